//! Clap derive structures for the `movesys` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// movesys -- operate the MoveSys logistics API from a terminal
#[derive(Debug, Parser)]
#[command(
    name = "movesys",
    version,
    about = "Manage MoveSys fleet, deliveries and staff from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides config)
    #[arg(long, env = "MOVESYS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Alternate host tried first when the API is unreachable
    #[arg(long, env = "MOVESYS_FALLBACK_URL", global = true)]
    pub fallback_url: Option<String>,

    /// Bearer token for the session
    #[arg(long, env = "MOVESYS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MOVESYS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format (defaults to the configured one, else table)
    #[arg(long, short = 'o', env = "MOVESYS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage console users and drivers
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage deliveries
    #[command(alias = "d")]
    Deliveries(CrudArgs),

    /// Manage fleet vehicles
    #[command(alias = "v")]
    Vehicles(VehiclesArgs),

    /// Manage fuel entries
    Fuel(CrudArgs),

    /// Manage maintenance records
    #[command(alias = "mnt")]
    Maintenance(CrudArgs),

    /// Load every domain and print the headline figures
    Dashboard(DashboardArgs),

    /// Fetch a report computed by the server
    Reports(ReportsArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ── Shared CRUD commands ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CrudArgs {
    #[command(subcommand)]
    pub command: CrudCommand,
}

#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// List the collection
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record
    Get {
        /// Record ID
        id: String,
    },

    /// Delete one record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Server-side search query
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Keep only records with this status
    #[arg(long)]
    pub status: Option<String>,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    #[command(flatten)]
    Common(CrudCommand),

    /// List users holding a role
    ByRole {
        /// driver, dispatcher, admin, ...
        role: String,
    },

    /// List active users
    Active,

    /// Activate or deactivate an account
    Status {
        /// User ID
        id: String,
        /// active or inactive
        status: String,
    },
}

// ── Vehicles ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    #[command(flatten)]
    Common(CrudCommand),

    /// Register a vehicle
    Create {
        /// License plate
        #[arg(long)]
        plate: String,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        year: Option<i64>,

        #[arg(long)]
        color: Option<String>,

        /// truck, van, car, motorcycle or trailer
        #[arg(long = "type", default_value = "truck")]
        vehicle_type: String,

        /// diesel, gasoline, electric or hybrid
        #[arg(long, default_value = "gasoline")]
        fuel_type: String,

        /// Load capacity
        #[arg(long)]
        capacity: Option<f64>,
    },

    /// Put a driver behind the wheel
    AssignDriver {
        /// Vehicle ID
        id: String,
        /// Driver name
        driver: String,
    },

    /// Remove the current driver
    UnassignDriver {
        /// Vehicle ID
        id: String,
    },

    /// Change operational status
    Status {
        /// Vehicle ID
        id: String,
        /// available, in_use, maintenance or out_of_service
        status: String,
    },

    /// Book the next service date
    ScheduleMaintenance {
        /// Vehicle ID
        id: String,
        /// Date (YYYY-MM-DD) or RFC 3339 timestamp
        date: String,
    },

    /// List vehicles the server reports as due for service
    Due,
}

// ── Dashboard & reports ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Ask the server for its own metrics instead of aggregating locally
    #[arg(long)]
    pub server: bool,
}

#[derive(Debug, Args)]
pub struct ReportsArgs {
    /// unified-operations, deliveries, vehicles, fuel or maintenance
    pub kind: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl GlobalOpts {
    /// Output format after config resolution.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}
