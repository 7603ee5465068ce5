//! Service order command implementations

use anyhow::Result;
use chrono::Local;
use geartrack_core::db::Database;
use geartrack_core::format::{format_currency, format_date_br};
use geartrack_core::models::{new_record_id, ServiceOrder, ServiceStatus};
use rust_decimal::Decimal;
use tracing::warn;

use super::{confirm, parse_choice, parse_date, parse_value, truncate};
use crate::cli::ServiceArgs;

fn print_service_table(db: &Database, services: &[ServiceOrder]) -> Result<()> {
    println!(
        "   {:>14} │ {:10} │ {:9} │ {:26} │ {:11} │ {:>14}",
        "ID", "Entry", "Plate", "Service", "Status", "Value"
    );
    println!("   ───────────────┼────────────┼───────────┼────────────────────────────┼─────────────┼───────────────");
    for s in services {
        println!(
            "   {:>14} │ {:10} │ {:9} │ {:26} │ {:11} │ {:>14}",
            s.id,
            format_date_br(s.entry_date),
            db.vehicle_plate_or_unknown(&s.vehicle_id)?,
            truncate(&s.service_type, 26),
            s.status.label(),
            format_currency(s.value)
        );
    }
    Ok(())
}

/// Print advisory problems of an order without rejecting it
fn report_issues(service: &ServiceOrder) {
    for issue in service.validate() {
        warn!("Service order {}: {}", service.id, issue);
        println!("   ⚠️  {}", issue);
    }
}

/// List service orders, most recent entry first
pub fn cmd_services_list(db: &Database, vehicle: Option<&str>, status: Option<&str>) -> Result<()> {
    let mut services = match vehicle {
        Some(vehicle_id) => db.services_for_vehicle(vehicle_id)?,
        None => {
            let mut all = db.get_services()?;
            all.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
            all
        }
    };
    if let Some(status) = status {
        let status: ServiceStatus = parse_choice(status)?;
        services.retain(|s| s.status == status);
    }

    if services.is_empty() {
        println!("No service orders found.");
        return Ok(());
    }

    println!();
    println!("🔧 Service orders ({})", services.len());
    println!();
    print_service_table(db, &services)
}

pub fn cmd_services_search(db: &Database, query: &str) -> Result<()> {
    let services = db.search_services(query)?;

    if services.is_empty() {
        println!("No service orders match '{}'.", query);
        return Ok(());
    }

    println!();
    println!("🔍 Service orders matching '{}' ({})", query, services.len());
    println!();
    print_service_table(db, &services)
}

pub fn cmd_services_show(db: &Database, id: &str) -> Result<()> {
    let s = db
        .get_service(id)?
        .ok_or_else(|| anyhow::anyhow!("Service order not found: {}", id))?;

    println!();
    println!("🔧 {} (id: {})", s.service_type, s.id);
    println!("   Vehicle: {}", db.vehicle_plate_or_unknown(&s.vehicle_id)?);
    println!("   Status:  {}", s.status.label());
    println!("   Entry:   {}", format_date_br(s.entry_date));
    match s.exit_date {
        Some(exit) => println!("   Exit:    {}", format_date_br(exit)),
        None => println!("   Exit:    -"),
    }
    println!("   Value:   {}", format_currency(s.value));
    println!(
        "   Payment: {}",
        s.payment_method.map(|p| p.label()).unwrap_or("-")
    );
    if !s.description.is_empty() {
        println!();
        println!("   {}", s.description);
    }
    report_issues(&s);
    Ok(())
}

/// Open a new service order
pub fn cmd_services_add(db: &Database, fields: &ServiceArgs) -> Result<()> {
    let vehicle_id = fields
        .vehicle
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--vehicle is required"))?;
    let service_type = fields
        .service_type
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--type is required"))?;

    if db.get_vehicle(&vehicle_id)?.is_none() {
        warn!("Vehicle {} does not exist; service order saved anyway", vehicle_id);
    }

    let mut service = ServiceOrder {
        id: new_record_id(),
        vehicle_id,
        service_type,
        description: String::new(),
        entry_date: Local::now().date_naive(),
        exit_date: None,
        status: ServiceStatus::Analysis,
        value: Decimal::ZERO,
        payment_method: None,
    };
    apply_fields(&mut service, fields)?;
    db.save_service(&service)?;

    println!(
        "✅ Opened service order '{}' (id: {})",
        service.service_type, service.id
    );
    report_issues(&service);
    Ok(())
}

/// Update the given fields of a service order
pub fn cmd_services_edit(db: &Database, id: &str, fields: &ServiceArgs) -> Result<()> {
    let mut service = db
        .get_service(id)?
        .ok_or_else(|| anyhow::anyhow!("Service order not found: {}", id))?;

    if let Some(vehicle) = &fields.vehicle {
        service.vehicle_id = vehicle.clone();
    }
    if let Some(service_type) = &fields.service_type {
        service.service_type = service_type.clone();
    }
    apply_fields(&mut service, fields)?;
    db.save_service(&service)?;

    println!(
        "✅ Updated service order '{}' (id: {})",
        service.service_type, service.id
    );
    report_issues(&service);
    Ok(())
}

/// Fields shared by add and edit. Empty `--exit`/`--payment` clear the value.
fn apply_fields(service: &mut ServiceOrder, fields: &ServiceArgs) -> Result<()> {
    if let Some(description) = &fields.description {
        service.description = description.clone();
    }
    if let Some(entry) = &fields.entry {
        service.entry_date = parse_date(entry, "--entry")?;
    }
    if let Some(exit) = &fields.exit {
        service.exit_date = if exit.trim().is_empty() {
            None
        } else {
            Some(parse_date(exit, "--exit")?)
        };
    }
    if let Some(status) = &fields.status {
        service.status = parse_choice(status)?;
    }
    if let Some(value) = &fields.value {
        service.value = parse_value(value)?;
    }
    if let Some(payment) = &fields.payment {
        service.payment_method = if payment.trim().is_empty() {
            None
        } else {
            Some(parse_choice(payment)?)
        };
    }
    Ok(())
}

pub fn cmd_services_delete(db: &Database, id: &str, yes: bool) -> Result<()> {
    let Some(service) = db.get_service(id)? else {
        println!("Service order not found: {} (nothing to delete)", id);
        return Ok(());
    };

    if !yes {
        println!(
            "⚠️  Deleting service order '{}' from {} ({}).",
            service.service_type,
            format_date_br(service.entry_date),
            format_currency(service.value)
        );
        if !confirm()? {
            return Ok(());
        }
    }

    db.delete_service(id)?;
    println!("✅ Deleted service order {}", service.id);
    Ok(())
}
