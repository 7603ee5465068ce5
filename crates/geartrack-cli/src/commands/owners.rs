//! Owner command implementations

use anyhow::Result;
use geartrack_core::db::Database;
use geartrack_core::format::format_mileage;
use geartrack_core::models::{new_record_id, Owner};

use super::{confirm, truncate};
use crate::cli::OwnerArgs;

fn print_owner_table(owners: &[Owner]) {
    println!(
        "   {:>14} │ {:24} │ {:16} │ {}",
        "ID", "Name", "Phone", "Email"
    );
    println!("   ───────────────┼──────────────────────────┼──────────────────┼─────────────────");
    for owner in owners {
        println!(
            "   {:>14} │ {:24} │ {:16} │ {}",
            owner.id,
            truncate(&owner.name, 24),
            truncate(&owner.phone, 16),
            owner.email
        );
    }
}

/// List all owners
pub fn cmd_owners_list(db: &Database) -> Result<()> {
    let owners = db.get_owners()?;

    if owners.is_empty() {
        println!("No owners found. Add one with:");
        println!("  geartrack owners add --name \"Maria Souza\" --phone \"(11) 90000-0000\"");
        return Ok(());
    }

    println!();
    println!("👤 Owners ({})", owners.len());
    println!();
    print_owner_table(&owners);
    Ok(())
}

pub fn cmd_owners_search(db: &Database, query: &str) -> Result<()> {
    let owners = db.search_owners(query)?;

    if owners.is_empty() {
        println!("No owners match '{}'.", query);
        return Ok(());
    }

    println!();
    println!("🔍 Owners matching '{}' ({})", query, owners.len());
    println!();
    print_owner_table(&owners);
    Ok(())
}

/// Show an owner with their vehicles
pub fn cmd_owners_show(db: &Database, id: &str) -> Result<()> {
    let owner = db
        .get_owner(id)?
        .ok_or_else(|| anyhow::anyhow!("Owner not found: {}", id))?;

    println!();
    println!("👤 {} (id: {})", owner.name, owner.id);
    println!("   Document: {}", owner.document);
    println!("   Phone:    {}", owner.phone);
    println!("   Email:    {}", owner.email);
    println!("   Address:  {}", owner.address);

    let vehicles = db.vehicles_for_owner(&owner.id)?;
    println!();
    if vehicles.is_empty() {
        println!("   No vehicles registered.");
    } else {
        println!("   Vehicles:");
        for v in vehicles {
            println!(
                "   • {} {} {} ({}) - {}, {}",
                v.plate,
                v.brand,
                v.model,
                v.year,
                v.gearbox_type.label(),
                format_mileage(v.mileage)
            );
        }
    }
    Ok(())
}

/// Add a new owner
pub fn cmd_owners_add(db: &Database, fields: &OwnerArgs) -> Result<()> {
    let name = fields
        .name
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--name is required"))?;

    let owner = Owner {
        id: new_record_id(),
        name,
        document: fields.document.clone().unwrap_or_default(),
        phone: fields.phone.clone().unwrap_or_default(),
        email: fields.email.clone().unwrap_or_default(),
        address: fields.address.clone().unwrap_or_default(),
    };
    db.save_owner(&owner)?;

    println!("✅ Created owner '{}' (id: {})", owner.name, owner.id);
    Ok(())
}

/// Update the given fields of an owner
pub fn cmd_owners_edit(db: &Database, id: &str, fields: &OwnerArgs) -> Result<()> {
    let mut owner = db
        .get_owner(id)?
        .ok_or_else(|| anyhow::anyhow!("Owner not found: {}", id))?;

    if let Some(name) = &fields.name {
        owner.name = name.clone();
    }
    if let Some(document) = &fields.document {
        owner.document = document.clone();
    }
    if let Some(phone) = &fields.phone {
        owner.phone = phone.clone();
    }
    if let Some(email) = &fields.email {
        owner.email = email.clone();
    }
    if let Some(address) = &fields.address {
        owner.address = address.clone();
    }
    db.save_owner(&owner)?;

    println!("✅ Updated owner '{}' (id: {})", owner.name, owner.id);
    Ok(())
}

/// Delete an owner. Their vehicles stay and show the owner as unknown.
pub fn cmd_owners_delete(db: &Database, id: &str, yes: bool) -> Result<()> {
    let Some(owner) = db.get_owner(id)? else {
        println!("Owner not found: {} (nothing to delete)", id);
        return Ok(());
    };

    if !yes {
        let vehicles = db.vehicles_for_owner(id)?.len();
        println!("⚠️  Deleting owner '{}' (id: {}).", owner.name, owner.id);
        if vehicles > 0 {
            println!("   {} vehicle(s) will remain without an owner.", vehicles);
        }
        if !confirm()? {
            return Ok(());
        }
    }

    db.delete_owner(id)?;
    println!("✅ Deleted owner '{}'", owner.name);
    Ok(())
}
