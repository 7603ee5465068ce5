//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `backup` - JSON snapshot export/import
//! - `core` - Init and shared utilities (open_db, parsing helpers)
//! - `owners` - Owner commands
//! - `vehicles` - Vehicle commands
//! - `services` - Service order commands
//! - `reports` - Revenue report and year listing
//! - `status` - Dashboard

pub mod backup;
pub mod core;
pub mod owners;
pub mod reports;
pub mod services;
pub mod status;
pub mod vehicles;

// Re-export command functions for main.rs
pub use backup::*;
pub use core::*;
pub use owners::*;
pub use reports::*;
pub use services::*;
pub use status::*;
pub use vehicles::*;

use std::io::{self, Write};

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask `Proceed? [y/N]` on stdin; anything but `y` declines
pub fn confirm() -> anyhow::Result<bool> {
    print!("Proceed? [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("Cancelled.");
        Ok(false)
    }
}
