//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - Argument parsing helpers shared by the record commands

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use geartrack_core::db::Database;
use rust_decimal::Decimal;

/// Open (or create) the store at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    db.seed_defaults().context("Failed to seed default records")?;

    println!(
        "   Owners: {}  Vehicles: {}  Service orders: {}",
        db.get_owners()?.len(),
        db.get_vehicles()?.len(),
        db.get_services()?.len()
    );
    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a customer: geartrack owners add --name \"Maria Souza\"");
    println!("  2. See the overview: geartrack dashboard");

    Ok(())
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, value))
}

/// Parse a money argument, accepting `1200.50` or `1200,50`
pub fn parse_value(value: &str) -> Result<Decimal> {
    Decimal::from_str(&value.trim().replace(',', "."))
        .with_context(|| format!("Invalid value '{}' (e.g. 1200.50)", value))
}

/// Parse one of the record enums through its `FromStr`
pub fn parse_choice<T: FromStr<Err = String>>(value: &str) -> Result<T> {
    value.trim().parse().map_err(|e: String| anyhow::anyhow!(e))
}
