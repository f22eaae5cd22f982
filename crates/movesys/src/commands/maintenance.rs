//! Maintenance record command handlers.

use tabled::Tabled;

use movesys_core::{Console, MaintenanceRecord};

use crate::cli::{CrudArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{date, opt, or_dash};

use super::crud::{self, View};

#[derive(Tabled)]
struct MaintenanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn row(m: &MaintenanceRecord) -> MaintenanceRow {
    MaintenanceRow {
        id: crud::id_of(m),
        vehicle: or_dash(&m.vehicle_plate),
        kind: m.maintenance_type.to_string(),
        date: date(m.maintenance_date),
        status: m.status.to_string(),
        cost: format!("{:.2}", m.cost),
        description: or_dash(&m.description),
    }
}

fn detail(m: &MaintenanceRecord) -> String {
    let mut lines = vec![
        format!("ID:          {}", crud::id_of(m)),
        format!("Vehicle:     {} ({})", or_dash(&m.vehicle_plate), opt(m.vehicle_id.as_ref())),
        format!("Type:        {}", m.maintenance_type),
        format!("Status:      {}", m.status),
        format!("Date:        {}", date(m.maintenance_date)),
        format!("Next:        {}", date(m.next_maintenance_date)),
        format!("Mileage:     {}", opt(m.mileage)),
        format!("Cost:        {:.2}", m.cost),
        format!("Provider:    {}", or_dash(&m.provider)),
        format!("Mechanic:    {}", or_dash(&m.mechanic)),
        format!("Description: {}", or_dash(&m.description)),
    ];
    if !m.parts.is_empty() {
        lines.push(format!("Parts:       {:.2} total", m.total_parts_cost()));
        lines.extend(
            m.parts
                .iter()
                .map(|p| format!("  - {} ({:.2})", or_dash(&p.name), p.cost)),
        );
    }
    lines.join("\n")
}

const VIEW: View<MaintenanceRecord, MaintenanceRow> = View {
    list_command: "maintenance list",
    row,
    detail,
};

pub async fn handle(console: &Console, args: CrudArgs, global: &GlobalOpts) -> Result<(), CliError> {
    crud::handle(console.maintenance(), args.command, global, &VIEW).await
}
