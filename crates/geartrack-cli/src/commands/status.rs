//! Dashboard command

use anyhow::Result;
use geartrack_core::db::Database;
use geartrack_core::format::{format_currency, format_date_br};

use super::truncate;

pub fn cmd_dashboard(db: &Database, recent_limit: usize) -> Result<()> {
    let stats = db.get_dashboard_stats(recent_limit)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         ⚙️  Geartrack Dashboard          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Owners:          {}", stats.total_owners);
    println!("  Vehicles:        {}", stats.total_vehicles);
    println!("  Active orders:   {}", stats.active_services);
    println!("  Total revenue:   {}", format_currency(stats.total_revenue));
    println!();

    if stats.recent_services.is_empty() {
        println!("  No service orders yet.");
        return Ok(());
    }

    println!("  Recent service orders:");
    for recent in &stats.recent_services {
        let s = &recent.service;
        println!(
            "    {} │ {:9} │ {:26} │ {:11} │ {:>14}",
            format_date_br(s.entry_date),
            recent.plate,
            truncate(&s.service_type, 26),
            s.status.label(),
            format_currency(s.value)
        );
    }

    Ok(())
}
