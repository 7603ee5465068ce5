//! Geartrack CLI - Gearbox repair shop manager
//!
//! Usage:
//!   geartrack init                          Initialize database
//!   geartrack dashboard                     Overview and recent orders
//!   geartrack services add --vehicle 1 ...  Open a service order
//!   geartrack report monthly --year 2024    Revenue by month
//!   geartrack report annual --export        Write the annual report as CSV

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use geartrack_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database_path_or_default());

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Dashboard { limit } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_dashboard(&db, limit.unwrap_or(config.recent_services))
        }
        Commands::Years => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_years(&db)
        }
        Commands::Owners { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None | Some(OwnersAction::List) => commands::cmd_owners_list(&db),
                Some(OwnersAction::Search { query }) => commands::cmd_owners_search(&db, &query),
                Some(OwnersAction::Show { id }) => commands::cmd_owners_show(&db, &id),
                Some(OwnersAction::Add(fields)) => commands::cmd_owners_add(&db, &fields),
                Some(OwnersAction::Edit { id, fields }) => {
                    commands::cmd_owners_edit(&db, &id, &fields)
                }
                Some(OwnersAction::Delete { id, yes }) => {
                    commands::cmd_owners_delete(&db, &id, yes)
                }
            }
        }
        Commands::Vehicles { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_vehicles_list(&db, None),
                Some(VehiclesAction::List { owner }) => {
                    commands::cmd_vehicles_list(&db, owner.as_deref())
                }
                Some(VehiclesAction::Search { query }) => {
                    commands::cmd_vehicles_search(&db, &query)
                }
                Some(VehiclesAction::Show { id }) => commands::cmd_vehicles_show(&db, &id),
                Some(VehiclesAction::Add(fields)) => commands::cmd_vehicles_add(&db, &fields),
                Some(VehiclesAction::Edit { id, fields }) => {
                    commands::cmd_vehicles_edit(&db, &id, &fields)
                }
                Some(VehiclesAction::Delete { id, yes }) => {
                    commands::cmd_vehicles_delete(&db, &id, yes)
                }
            }
        }
        Commands::Services { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_services_list(&db, None, None),
                Some(ServicesAction::List { vehicle, status }) => {
                    commands::cmd_services_list(&db, vehicle.as_deref(), status.as_deref())
                }
                Some(ServicesAction::Search { query }) => {
                    commands::cmd_services_search(&db, &query)
                }
                Some(ServicesAction::Show { id }) => commands::cmd_services_show(&db, &id),
                Some(ServicesAction::Add(fields)) => commands::cmd_services_add(&db, &fields),
                Some(ServicesAction::Edit { id, fields }) => {
                    commands::cmd_services_edit(&db, &id, &fields)
                }
                Some(ServicesAction::Delete { id, yes }) => {
                    commands::cmd_services_delete(&db, &id, yes)
                }
            }
        }
        Commands::Report { view, year, export } => {
            let db = commands::open_db(&db_path)?;
            let export_dir = export.map(|dir| {
                dir.or_else(|| config.export_dir.clone())
                    .unwrap_or_else(|| std::path::PathBuf::from("."))
            });
            commands::cmd_report(&db, &view, year, export_dir.as_deref())
        }
        Commands::Backup { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                BackupAction::Export { file } => commands::cmd_backup_export(&db, &file),
                BackupAction::Import { file, replace, yes } => {
                    commands::cmd_backup_import(&db, &file, replace, yes)
                }
            }
        }
    }
}
