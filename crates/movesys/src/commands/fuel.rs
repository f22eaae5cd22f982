//! Fuel entry command handlers.

use tabled::Tabled;

use movesys_core::{Console, FuelEntry};

use crate::cli::{CrudArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{date, opt, or_dash};

use super::crud::{self, View};

#[derive(Tabled)]
struct FuelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Filled")]
    filled: String,
    #[tabled(rename = "Liters")]
    liters: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Per L")]
    per_liter: String,
    #[tabled(rename = "Fuel")]
    fuel_type: String,
    #[tabled(rename = "Station")]
    station: String,
}

fn row(f: &FuelEntry) -> FuelRow {
    FuelRow {
        id: crud::id_of(f),
        vehicle: or_dash(&f.vehicle_plate),
        filled: date(f.filled_at),
        liters: format!("{:.2}", f.liters),
        cost: format!("{:.2}", f.cost),
        per_liter: format!("{:.2}", f.cost_per_liter()),
        fuel_type: f.fuel_type.to_string(),
        station: or_dash(&f.station),
    }
}

fn detail(f: &FuelEntry) -> String {
    [
        format!("ID:       {}", crud::id_of(f)),
        format!("Vehicle:  {} ({})", or_dash(&f.vehicle_plate), opt(f.vehicle_id.as_ref())),
        format!("Filled:   {}", date(f.filled_at)),
        format!("Liters:   {:.2}", f.liters),
        format!("Cost:     {:.2} ({:.2}/L)", f.cost, f.cost_per_liter()),
        format!("Fuel:     {}", f.fuel_type),
        format!("Station:  {}", or_dash(&f.station)),
        format!("Odometer: {}", opt(f.odometer)),
        format!("Notes:    {}", or_dash(&f.notes)),
    ]
    .join("\n")
}

const VIEW: View<FuelEntry, FuelRow> = View {
    list_command: "fuel list",
    row,
    detail,
};

pub async fn handle(console: &Console, args: CrudArgs, global: &GlobalOpts) -> Result<(), CliError> {
    crud::handle(console.fuel_entries(), args.command, global, &VIEW).await
}
