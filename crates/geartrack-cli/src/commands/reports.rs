//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use geartrack_core::db::Database;
use geartrack_core::format::{format_currency, format_share};
use geartrack_core::models::{Bucket, ViewType};
use geartrack_core::{available_years, consolidate, current_year, write_report};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::parse_choice;

const BAR_WIDTH: u32 = 30;

/// Bar proportional to the largest bucket
fn bar(bucket: &Bucket, max_value: Decimal) -> String {
    let cells = bucket
        .value
        .checked_div(max_value)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(BAR_WIDTH)))
        .and_then(|cells| cells.round().to_usize())
        .unwrap_or(0);
    "█".repeat(cells)
}

/// Print a revenue consolidation and optionally export it as CSV
pub fn cmd_report(
    db: &Database,
    view: &str,
    year: Option<i32>,
    export_dir: Option<&Path>,
) -> Result<()> {
    let view: ViewType = parse_choice(view)?;
    let year = year.unwrap_or_else(current_year);

    let services = db.get_services()?;
    let report = consolidate(&services, view, year)?;

    println!();
    match report.year {
        Some(y) => println!("📈 Revenue report - {} {}", view, y),
        None => println!("📈 Revenue report - {} (all years)", view),
    }
    println!();
    println!(
        "   {:22} │ {:>6} │ {:>16} │ {:>6} │",
        "Period", "Orders", "Revenue", "Share"
    );
    println!("   ───────────────────────┼────────┼──────────────────┼────────┤");
    for bucket in &report.buckets {
        println!(
            "   {:22} │ {:>6} │ {:>16} │ {:>5}% │ {}",
            bucket.label,
            bucket.count,
            format_currency(bucket.value),
            format_share(bucket.share_percent, report.total_value),
            bar(bucket, report.max_value)
        );
    }
    if report.buckets.is_empty() {
        println!("   (no finished service orders yet)");
    }
    println!();
    println!("   Total revenue:  {}", format_currency(report.total_value));
    println!("   Finished jobs:  {}", report.total_count);
    println!("   Average ticket: {}", format_currency(report.average_ticket));

    if let Some(dir) = export_dir {
        let path = write_report(dir, &report)
            .with_context(|| format!("Failed to export report to {}", dir.display()))?;
        println!();
        println!("✅ Exported to: {}", path.display());
    }

    Ok(())
}

/// List years that have finished service orders, plus the current one
pub fn cmd_years(db: &Database) -> Result<()> {
    let services = db.get_services()?;
    let years = available_years(&services, current_year());

    println!();
    println!("📅 Report years");
    for year in years {
        println!("   {}", year);
    }
    Ok(())
}
