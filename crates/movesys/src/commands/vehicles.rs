//! Vehicle command handlers.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tabled::Tabled;

use movesys_core::{Console, EntityId, FuelType, Vehicle, VehicleStatus};

use crate::cli::{GlobalOpts, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output::{self, date, opt, or_dash};

use super::crud::{self, View, parse};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Vehicle")]
    name: String,
    #[tabled(rename = "Type")]
    vehicle_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Mileage")]
    mileage: i64,
    #[tabled(rename = "Service")]
    service: String,
}

fn row(v: &Vehicle) -> VehicleRow {
    VehicleRow {
        id: crud::id_of(v),
        plate: v.license_plate.clone(),
        name: format!("{} {}", v.brand, v.model).trim().to_owned(),
        vehicle_type: v.vehicle_type.to_string(),
        status: v.status.to_string(),
        driver: opt(v.current_driver.as_deref()),
        mileage: v.mileage,
        service: v.maintenance_status(Utc::now()).to_string(),
    }
}

fn detail(v: &Vehicle) -> String {
    [
        format!("ID:           {}", crud::id_of(v)),
        format!("Vehicle:      {}", v.full_name()),
        format!("Year:         {}", opt(v.year)),
        format!("Color:        {}", or_dash(&v.color)),
        format!("Type:         {}", v.vehicle_type),
        format!("Capacity:     {}", opt(v.capacity)),
        format!("Fuel:         {}", v.fuel_type),
        format!("Status:       {}", v.status),
        format!("Driver:       {}", opt(v.current_driver.as_deref())),
        format!("Mileage:      {}", v.mileage),
        format!("Last service: {}", date(v.last_maintenance)),
        format!(
            "Next service: {} ({})",
            date(v.next_maintenance),
            v.maintenance_status(Utc::now())
        ),
    ]
    .join("\n")
}

const VIEW: View<Vehicle, VehicleRow> = View {
    list_command: "vehicles list",
    row,
    detail,
};

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: VehiclesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.vehicles();
    match args.command {
        VehiclesCommand::Common(command) => crud::handle(store, command, global, &VIEW).await,

        VehiclesCommand::Create {
            plate,
            brand,
            model,
            year,
            color,
            vehicle_type,
            fuel_type,
            capacity,
        } => {
            let draft = Vehicle {
                license_plate: plate,
                brand,
                model,
                year,
                color: color.unwrap_or_default(),
                vehicle_type: parse("type", &vehicle_type)?,
                fuel_type: parse::<FuelType>("fuel-type", &fuel_type)?,
                capacity,
                ..Vehicle::default()
            };
            let created = store.create(&draft).await?;
            show(&created, global)
        }

        VehiclesCommand::AssignDriver { id, driver } => {
            let vehicle = store
                .assign_driver(&EntityId::from(id.as_str()), &driver)
                .await?;
            show(&vehicle, global)
        }

        VehiclesCommand::UnassignDriver { id } => {
            let vehicle = store.unassign_driver(&EntityId::from(id.as_str())).await?;
            show(&vehicle, global)
        }

        VehiclesCommand::Status { id, status } => {
            let status: VehicleStatus = parse("status", &status)?;
            let vehicle = store
                .update_status(&EntityId::from(id.as_str()), status)
                .await?;
            show(&vehicle, global)
        }

        VehiclesCommand::ScheduleMaintenance { id, date } => {
            let next = service_date(&date)?;
            let vehicle = store
                .schedule_maintenance(&EntityId::from(id.as_str()), next)
                .await?;
            show(&vehicle, global)
        }

        VehiclesCommand::Due => {
            store.fetch_maintenance_due().await?;
            crud::print_list(store, global, &VIEW)
        }
    }
}

fn show(vehicle: &Arc<Vehicle>, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.format(), vehicle.as_ref(), detail, crud::id_of)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// A plain date is taken as midnight UTC.
fn service_date(raw: &str) -> Result<DateTime<Utc>, CliError> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| CliError::Validation {
            field: "date".into(),
            reason: format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{raw}'"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn service_dates_accept_days_and_timestamps() {
        let midnight = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(service_date("2024-09-01").unwrap(), midnight);
        assert_eq!(service_date("2024-09-01T02:00:00+02:00").unwrap(), midnight);
        assert!(service_date("next week").is_err());
    }
}
