//! Vehicle command implementations

use anyhow::Result;
use geartrack_core::db::Database;
use geartrack_core::format::{format_currency, format_date_br, format_mileage};
use geartrack_core::models::{new_record_id, GearboxType, Vehicle};

use super::{confirm, parse_choice, truncate};
use crate::cli::VehicleArgs;

fn print_vehicle_table(db: &Database, vehicles: &[Vehicle]) -> Result<()> {
    println!(
        "   {:>14} │ {:9} │ {:22} │ {:5} │ {:14} │ {}",
        "ID", "Plate", "Vehicle", "Year", "Gearbox", "Owner"
    );
    println!("   ───────────────┼───────────┼────────────────────────┼───────┼────────────────┼──────────────");
    for v in vehicles {
        println!(
            "   {:>14} │ {:9} │ {:22} │ {:5} │ {:14} │ {}",
            v.id,
            v.plate,
            truncate(&format!("{} {}", v.brand, v.model), 22),
            v.year,
            v.gearbox_type.label(),
            db.owner_name_or_unknown(&v.owner_id)?
        );
    }
    Ok(())
}

/// List vehicles, optionally for one owner
pub fn cmd_vehicles_list(db: &Database, owner: Option<&str>) -> Result<()> {
    let vehicles = match owner {
        Some(owner_id) => db.vehicles_for_owner(owner_id)?,
        None => db.get_vehicles()?,
    };

    if vehicles.is_empty() {
        println!("No vehicles found. Add one with:");
        println!("  geartrack vehicles add --plate ABC-1234 --brand Toyota --model Corolla --owner <id>");
        return Ok(());
    }

    println!();
    println!("🚗 Vehicles ({})", vehicles.len());
    println!();
    print_vehicle_table(db, &vehicles)
}

pub fn cmd_vehicles_search(db: &Database, query: &str) -> Result<()> {
    let vehicles = db.search_vehicles(query)?;

    if vehicles.is_empty() {
        println!("No vehicles match '{}'.", query);
        return Ok(());
    }

    println!();
    println!("🔍 Vehicles matching '{}' ({})", query, vehicles.len());
    println!();
    print_vehicle_table(db, &vehicles)
}

/// Show a vehicle with its service history
pub fn cmd_vehicles_show(db: &Database, id: &str) -> Result<()> {
    let v = db
        .get_vehicle(id)?
        .ok_or_else(|| anyhow::anyhow!("Vehicle not found: {}", id))?;

    println!();
    println!("🚗 {} - {} {} (id: {})", v.plate, v.brand, v.model, v.id);
    println!("   Year:    {}", v.year);
    println!("   Color:   {}", v.color);
    println!("   Gearbox: {}", v.gearbox_type.label());
    println!("   Mileage: {}", format_mileage(v.mileage));
    println!("   Owner:   {}", db.owner_name_or_unknown(&v.owner_id)?);

    let services = db.services_for_vehicle(&v.id)?;
    println!();
    if services.is_empty() {
        println!("   No service history.");
    } else {
        println!("   Service history:");
        for s in services {
            println!(
                "   • {} {} - {} ({})",
                format_date_br(s.entry_date),
                s.service_type,
                format_currency(s.value),
                s.status.label()
            );
        }
    }
    Ok(())
}

/// Register a new vehicle
pub fn cmd_vehicles_add(db: &Database, fields: &VehicleArgs) -> Result<()> {
    let plate = fields
        .plate
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--plate is required"))?;
    let owner_id = fields
        .owner
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--owner is required"))?;

    if db.get_owner(&owner_id)?.is_none() {
        tracing::warn!("Owner {} does not exist; vehicle saved anyway", owner_id);
    }

    let gearbox_type = match &fields.gearbox {
        Some(g) => parse_choice(g)?,
        None => GearboxType::Manual,
    };

    let vehicle = Vehicle {
        id: new_record_id(),
        plate: plate.trim().to_uppercase(),
        brand: fields.brand.clone().unwrap_or_default(),
        model: fields.model.clone().unwrap_or_default(),
        year: fields.year.unwrap_or_default(),
        color: fields.color.clone().unwrap_or_default(),
        gearbox_type,
        mileage: fields.mileage.unwrap_or_default(),
        owner_id,
    };
    db.save_vehicle(&vehicle)?;

    println!("✅ Created vehicle {} (id: {})", vehicle.plate, vehicle.id);
    Ok(())
}

/// Update the given fields of a vehicle
pub fn cmd_vehicles_edit(db: &Database, id: &str, fields: &VehicleArgs) -> Result<()> {
    let mut vehicle = db
        .get_vehicle(id)?
        .ok_or_else(|| anyhow::anyhow!("Vehicle not found: {}", id))?;

    if let Some(plate) = &fields.plate {
        vehicle.plate = plate.trim().to_uppercase();
    }
    if let Some(brand) = &fields.brand {
        vehicle.brand = brand.clone();
    }
    if let Some(model) = &fields.model {
        vehicle.model = model.clone();
    }
    if let Some(year) = fields.year {
        vehicle.year = year;
    }
    if let Some(color) = &fields.color {
        vehicle.color = color.clone();
    }
    if let Some(gearbox) = &fields.gearbox {
        vehicle.gearbox_type = parse_choice(gearbox)?;
    }
    if let Some(mileage) = fields.mileage {
        vehicle.mileage = mileage;
    }
    if let Some(owner) = &fields.owner {
        vehicle.owner_id = owner.clone();
    }
    db.save_vehicle(&vehicle)?;

    println!("✅ Updated vehicle {} (id: {})", vehicle.plate, vehicle.id);
    Ok(())
}

/// Delete a vehicle. Its service orders stay and show the plate as N/A.
pub fn cmd_vehicles_delete(db: &Database, id: &str, yes: bool) -> Result<()> {
    let Some(vehicle) = db.get_vehicle(id)? else {
        println!("Vehicle not found: {} (nothing to delete)", id);
        return Ok(());
    };

    if !yes {
        let services = db.services_for_vehicle(id)?.len();
        println!("⚠️  Deleting vehicle {} (id: {}).", vehicle.plate, vehicle.id);
        if services > 0 {
            println!("   {} service order(s) will remain without a vehicle.", services);
        }
        if !confirm()? {
            return Ok(());
        }
    }

    db.delete_vehicle(id)?;
    println!("✅ Deleted vehicle {}", vehicle.plate);
    Ok(())
}
