// ── Dashboard aggregates ──
//
// Pure roll-up over the stores' current caches. Recomputed on demand.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::console::Console;

/// Headline figures shown on the console's landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    pub total_deliveries: usize,
    pub pending_deliveries: usize,
    pub completed_deliveries: usize,
    pub fleet_available: usize,
    pub fleet_in_use: usize,
    pub fleet_in_maintenance: usize,
    /// Liters filled on the same UTC day as `now`.
    pub fuel_liters_today: f64,
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub maintenance_overdue: usize,
}

impl DashboardSummary {
    pub fn from_console(console: &Console, now: DateTime<Utc>) -> Self {
        let users = console.users().snapshot();
        let deliveries = console.deliveries().snapshot();
        let vehicles = console.vehicles().snapshot();
        let fuel = console.fuel_entries().snapshot();
        let maintenance = console.maintenance().snapshot();

        let active_users = users.iter().filter(|u| u.is_active()).count();
        let today = now.date_naive();

        Self {
            total_users: users.len(),
            active_users,
            inactive_users: users.len() - active_users,
            total_deliveries: deliveries.len(),
            pending_deliveries: deliveries.iter().filter(|d| d.is_pending()).count(),
            completed_deliveries: deliveries.iter().filter(|d| d.is_completed()).count(),
            fleet_available: vehicles.iter().filter(|v| v.is_available()).count(),
            fleet_in_use: vehicles.iter().filter(|v| v.is_in_use()).count(),
            fleet_in_maintenance: vehicles.iter().filter(|v| v.is_in_maintenance()).count(),
            fuel_liters_today: fuel
                .iter()
                .filter(|f| f.filled_at.is_some_and(|at| at.date_naive() == today))
                .map(|f| f.liters)
                .sum(),
            total_fuel_cost: fuel.iter().map(|f| f.cost).sum(),
            total_maintenance_cost: maintenance.iter().map(|m| m.cost).sum(),
            maintenance_overdue: maintenance.iter().filter(|m| m.is_overdue(now)).count(),
        }
    }
}
