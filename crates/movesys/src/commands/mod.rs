//! Command dispatch: bridges CLI args -> console stores -> output formatting.

pub mod config_cmd;
pub mod crud;
pub mod dashboard;
pub mod deliveries;
pub mod fuel;
pub mod maintenance;
pub mod reports;
pub mod users;
pub mod vehicles;

use movesys_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Users(args) => users::handle(console, args, global).await,
        Command::Deliveries(args) => deliveries::handle(console, args, global).await,
        Command::Vehicles(args) => vehicles::handle(console, args, global).await,
        Command::Fuel(args) => fuel::handle(console, args, global).await,
        Command::Maintenance(args) => maintenance::handle(console, args, global).await,
        Command::Dashboard(args) => dashboard::handle(console, &args, global).await,
        Command::Reports(args) => reports::handle(console, &args, global).await,
        Command::Config(_) => Err(CliError::Internal(
            "config commands are handled before connecting".into(),
        )),
    }
}
