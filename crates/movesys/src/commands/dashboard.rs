//! Dashboard handler: loads every domain and prints the roll-up, or shows
//! the server's own metrics with `--server`.

use chrono::Utc;
use tracing::warn;

use movesys_core::{Console, CoreError, DashboardMetrics, DashboardSummary};

use crate::cli::{DashboardArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Users, deliveries, vehicles, fuel, maintenance.
const DOMAINS: usize = 5;

fn detail(s: &DashboardSummary) -> String {
    [
        format!(
            "Users:       {} total, {} active, {} inactive",
            s.total_users, s.active_users, s.inactive_users
        ),
        format!(
            "Deliveries:  {} total, {} pending, {} completed",
            s.total_deliveries, s.pending_deliveries, s.completed_deliveries
        ),
        format!(
            "Fleet:       {} available, {} in use, {} in maintenance",
            s.fleet_available, s.fleet_in_use, s.fleet_in_maintenance
        ),
        format!(
            "Fuel:        {:.2} L today, {:.2} total cost",
            s.fuel_liters_today, s.total_fuel_cost
        ),
        format!(
            "Maintenance: {:.2} total cost, {} overdue",
            s.total_maintenance_cost, s.maintenance_overdue
        ),
    ]
    .join("\n")
}

fn plain(s: &DashboardSummary) -> String {
    [
        format!("total_users={}", s.total_users),
        format!("active_users={}", s.active_users),
        format!("inactive_users={}", s.inactive_users),
        format!("total_deliveries={}", s.total_deliveries),
        format!("pending_deliveries={}", s.pending_deliveries),
        format!("completed_deliveries={}", s.completed_deliveries),
        format!("fleet_available={}", s.fleet_available),
        format!("fleet_in_use={}", s.fleet_in_use),
        format!("fleet_in_maintenance={}", s.fleet_in_maintenance),
        format!("fuel_liters_today={}", s.fuel_liters_today),
        format!("total_fuel_cost={}", s.total_fuel_cost),
        format!("total_maintenance_cost={}", s.total_maintenance_cost),
        format!("maintenance_overdue={}", s.maintenance_overdue),
    ]
    .join("\n")
}

fn server_detail(m: &DashboardMetrics) -> String {
    [
        format!(
            "Users:       {} total, {} active, {} inactive",
            m.total_users, m.active_users, m.inactive_users
        ),
        format!(
            "Deliveries:  {} total, {} pending, {} completed",
            m.total_deliveries, m.pending_deliveries, m.completed_deliveries
        ),
        format!(
            "Fleet:       {} available, {} in maintenance",
            m.fleet_available, m.fleet_in_maintenance
        ),
        format!("Fuel:        {:.2} L today", m.fuel_consumption_today),
        format!("Alerts:      {}", m.alerts.len()),
    ]
    .join("\n")
}

fn server_plain(m: &DashboardMetrics) -> String {
    [
        format!("total_users={}", m.total_users),
        format!("active_users={}", m.active_users),
        format!("inactive_users={}", m.inactive_users),
        format!("total_deliveries={}", m.total_deliveries),
        format!("pending_deliveries={}", m.pending_deliveries),
        format!("completed_deliveries={}", m.completed_deliveries),
        format!("fleet_available={}", m.fleet_available),
        format!("fleet_in_maintenance={}", m.fleet_in_maintenance),
        format!("fuel_consumption_today={}", m.fuel_consumption_today),
        format!("alerts={}", m.alerts.len()),
    ]
    .join("\n")
}

pub async fn handle(
    console: &Console,
    args: &DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.server {
        let metrics = console.reports().fetch_metrics().await?;
        let out = match global.format() {
            OutputFormat::Plain => server_plain(&metrics),
            format => output::render_single(format, &metrics, server_detail, server_plain)?,
        };
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    // Domains that loaded still count; the rest are reported and skipped.
    match console.fetch_all_data().await {
        Ok(()) => {}
        Err(CoreError::PartialFetch { failures }) if failures.len() < DOMAINS => {
            warn!(?failures, "dashboard is missing some domains");
            if !global.quiet {
                eprintln!("warning: failed to load {}", failures.join(", "));
            }
        }
        Err(err) => return Err(err.into()),
    }

    let summary = console.dashboard(Utc::now());
    let out = match global.format() {
        OutputFormat::Plain => plain(&summary),
        format => output::render_single(format, &summary, detail, plain)?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
