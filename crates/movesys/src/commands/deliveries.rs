//! Delivery command handlers.

use tabled::Tabled;

use movesys_core::{Console, Delivery};

use crate::cli::{CrudArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{date, opt, or_dash};

use super::crud::{self, View};

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
}

fn route(d: &Delivery) -> String {
    format!(
        "{} -> {}",
        or_dash(&d.origin_province),
        or_dash(&d.destination_province)
    )
}

fn row(d: &Delivery) -> DeliveryRow {
    DeliveryRow {
        id: crud::id_of(d),
        code: or_dash(&d.code),
        customer: or_dash(&d.customer_name),
        route: route(d),
        scheduled: date(d.scheduled_at),
        status: d.status.to_string(),
        vehicle: or_dash(&d.vehicle_plate),
    }
}

fn detail(d: &Delivery) -> String {
    [
        format!("ID:        {}", crud::id_of(d)),
        format!("Code:      {}", or_dash(&d.code)),
        format!("Customer:  {}", or_dash(&d.customer_name)),
        format!("Address:   {}", or_dash(&d.address)),
        format!("Route:     {}", route(d)),
        format!("Scheduled: {}", date(d.scheduled_at)),
        format!("Status:    {}", d.status),
        format!("Vehicle:   {}", or_dash(&d.vehicle_plate)),
        format!("Driver:    {}", or_dash(&d.driver_name)),
        format!("Distance:  {}", opt(d.distance_km.map(|km| format!("{km:.1} km")))),
        format!("ETA:       {}", opt(d.eta_minutes.map(|m| format!("{m} min")))),
    ]
    .join("\n")
}

const VIEW: View<Delivery, DeliveryRow> = View {
    list_command: "deliveries list",
    row,
    detail,
};

pub async fn handle(console: &Console, args: CrudArgs, global: &GlobalOpts) -> Result<(), CliError> {
    crud::handle(console.deliveries(), args.command, global, &VIEW).await
}
