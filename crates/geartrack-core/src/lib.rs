//! Geartrack Core Library
//!
//! Shared functionality for the Geartrack gearbox shop manager:
//! - Key-value store for owners, vehicles and service orders
//! - Revenue consolidation by month, quarter and year
//! - Spreadsheet (CSV) report export and JSON snapshots
//! - Fixed-locale currency, number and date formatting
//! - Optional TOML configuration

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod reports;

pub use config::{default_config_path, Config};
pub use db::{Database, Record};
pub use error::{Error, Result};
pub use export::{
    export_report_csv, report_file_name, write_report, Snapshot, SnapshotImportStats,
    EXPORT_CONTENT_TYPE,
};
pub use models::{
    Bucket, Consolidation, DashboardStats, GearboxType, Owner, PaymentMethod, RecentService,
    ServiceOrder, ServiceStatus, ValidationIssue, Vehicle, ViewType,
};
pub use reports::{available_years, consolidate, current_year};
