//! Snapshot export/import commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geartrack_core::db::Database;
use geartrack_core::Snapshot;

use super::confirm;

/// Write every record to a JSON snapshot file
pub fn cmd_backup_export(db: &Database, output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting snapshot...");

    let snapshot = db.export_snapshot()?;
    let json =
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot to JSON")?;
    fs::write(output, json)
        .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;

    println!("✅ Snapshot exported to: {}", output.display());
    println!("   Version: {}", snapshot.metadata.version);
    println!("   Owners: {}", snapshot.owners.len());
    println!("   Vehicles: {}", snapshot.vehicles.len());
    println!("   Service orders: {}", snapshot.services.len());

    Ok(())
}

/// Load a JSON snapshot, merging by ID or replacing each collection
pub fn cmd_backup_import(db: &Database, input: &Path, replace: bool, yes: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Snapshot file not found: {}", input.display());
    }

    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read snapshot: {}", input.display()))?;
    let snapshot: Snapshot =
        serde_json::from_str(&json).context("Failed to parse snapshot file as JSON")?;

    println!("📦 Importing snapshot from: {}", input.display());
    println!("   Version: {}", snapshot.metadata.version);
    println!("   Created: {}", snapshot.metadata.created_at);
    println!("   Total records: {}", snapshot.metadata.total_records);
    println!();

    if !yes {
        if replace {
            println!("⚠️  This will REPLACE all owners, vehicles and service orders.");
        } else {
            println!("⚠️  Records with matching IDs will be overwritten.");
        }
        if !confirm()? {
            return Ok(());
        }
    }

    let stats = db.import_snapshot(&snapshot, replace)?;

    println!("✅ Imported {} record(s)", stats.total());
    println!("   Owners: {}", stats.owners);
    println!("   Vehicles: {}", stats.vehicles);
    println!("   Service orders: {}", stats.services);

    Ok(())
}
