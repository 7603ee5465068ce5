//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Geartrack - Gearbox repair shop manager
#[derive(Parser)]
#[command(name = "geartrack")]
#[command(about = "Customers, vehicles, service orders and revenue reports for a gearbox shop", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the config file's storage.database_path, then geartrack.db)
    #[arg(long, env = "GEARTRACK_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/geartrack/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed the default records
    Init,

    /// Show dashboard summary
    Dashboard {
        /// Number of recent service orders to show (defaults to the config value)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Manage owners (customers)
    Owners {
        #[command(subcommand)]
        action: Option<OwnersAction>,
    },

    /// Manage vehicles
    Vehicles {
        #[command(subcommand)]
        action: Option<VehiclesAction>,
    },

    /// Manage service orders
    Services {
        #[command(subcommand)]
        action: Option<ServicesAction>,
    },

    /// Revenue report of finished service orders
    Report {
        /// View: monthly, quarterly, annual
        view: String,

        /// Year for monthly/quarterly views (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Also write the report as CSV into this directory
        /// (without a value: the config's export directory, then the current one)
        #[arg(long)]
        export: Option<Option<PathBuf>>,
    },

    /// List years available for reports
    Years,

    /// Export or import a JSON snapshot of all records
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
}

#[derive(Subcommand)]
pub enum OwnersAction {
    /// List all owners
    List,

    /// Search by name, document or phone
    Search {
        query: String,
    },

    /// Show an owner and their vehicles
    Show {
        id: String,
    },

    /// Add a new owner
    Add(OwnerArgs),

    /// Change fields of an existing owner
    Edit {
        id: String,
        #[command(flatten)]
        fields: OwnerArgs,
    },

    /// Delete an owner (vehicles are kept)
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct OwnerArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// CPF/CNPJ or any ID document
    #[arg(long)]
    pub document: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand)]
pub enum VehiclesAction {
    /// List vehicles
    List {
        /// Only vehicles of this owner
        #[arg(long)]
        owner: Option<String>,
    },

    /// Search by plate, model or brand
    Search {
        query: String,
    },

    /// Show a vehicle and its service history
    Show {
        id: String,
    },

    /// Add a new vehicle
    Add(VehicleArgs),

    /// Change fields of an existing vehicle
    Edit {
        id: String,
        #[command(flatten)]
        fields: VehicleArgs,
    },

    /// Delete a vehicle (service orders are kept)
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct VehicleArgs {
    #[arg(long)]
    pub plate: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub color: Option<String>,
    /// Gearbox: manual, automatic, cvt, dual-clutch, automated
    #[arg(long)]
    pub gearbox: Option<String>,
    /// Odometer reading in km
    #[arg(long)]
    pub mileage: Option<u32>,
    /// Owner ID
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Subcommand)]
pub enum ServicesAction {
    /// List service orders, most recent entry first
    List {
        /// Only orders for this vehicle
        #[arg(long)]
        vehicle: Option<String>,

        /// Only orders with this status: analysis, repair, finished, cancelled
        #[arg(long)]
        status: Option<String>,
    },

    /// Search by service type, description or plate
    Search {
        query: String,
    },

    /// Show a service order
    Show {
        id: String,
    },

    /// Open a new service order
    Add(ServiceArgs),

    /// Change fields of an existing service order
    Edit {
        id: String,
        #[command(flatten)]
        fields: ServiceArgs,
    },

    /// Delete a service order
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Vehicle ID
    #[arg(long)]
    pub vehicle: Option<String>,
    /// Service type, e.g. "Troca de Óleo de Câmbio"
    #[arg(long = "type")]
    pub service_type: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Entry date (YYYY-MM-DD, defaults to today when adding)
    #[arg(long)]
    pub entry: Option<String>,
    /// Exit date (YYYY-MM-DD, empty to clear)
    #[arg(long)]
    pub exit: Option<String>,
    /// Status: analysis, repair, finished, cancelled
    #[arg(long)]
    pub status: Option<String>,
    /// Charged value, e.g. 1200.50
    #[arg(long)]
    pub value: Option<String>,
    /// Payment: money, credit-card, debit-card, pix, transfer, boleto, not-paid (empty to clear)
    #[arg(long)]
    pub payment: Option<String>,
}

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write all records to a JSON file
    Export {
        /// Output file
        file: PathBuf,
    },

    /// Load records from a JSON file
    Import {
        /// Snapshot file
        file: PathBuf,

        /// Overwrite each collection instead of merging by ID
        #[arg(long)]
        replace: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
