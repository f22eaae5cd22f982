// ── Server reports and dashboard metrics ──
//
// Read-only views the server computes itself. Report bodies are handed
// through untouched; the metrics body is read into a fixed record with
// zero for anything the server left out.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};
use tokio::sync::watch;
use tracing::{debug, error};

use movesys_api::{ApiResponse, ResourceEndpoint};

use crate::assemble::Wire;
use crate::error::{CoreError, user_message};

/// Report views published under the reports path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ReportKind {
    UnifiedOperations,
    Deliveries,
    Vehicles,
    Fuel,
    Maintenance,
}

impl ReportKind {
    pub const ALL: [Self; 5] = [
        Self::UnifiedOperations,
        Self::Deliveries,
        Self::Vehicles,
        Self::Fuel,
        Self::Maintenance,
    ];

    /// Location relative to the reports path.
    pub fn sub_path(self) -> &'static str {
        match self {
            Self::UnifiedOperations => "unified-operations",
            Self::Deliveries => "deliveries/summary",
            Self::Vehicles => "vehicles/summary",
            Self::Fuel => "fuel/summary",
            Self::Maintenance => "maintenance/summary",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::UnifiedOperations => "unified operations report",
            Self::Deliveries => "delivery summary",
            Self::Vehicles => "vehicle summary",
            Self::Fuel => "fuel summary",
            Self::Maintenance => "maintenance summary",
        }
    }
}

/// Headline figures as the server computes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub total_deliveries: u64,
    pub pending_deliveries: u64,
    pub completed_deliveries: u64,
    pub fleet_available: u64,
    pub fleet_in_maintenance: u64,
    pub fuel_consumption_today: f64,
    pub alerts: Vec<Value>,
}

impl DashboardMetrics {
    pub fn from_response(response: &ApiResponse) -> Self {
        response
            .body
            .as_ref()
            .map_or_else(Self::default, Self::from_value)
    }

    /// Missing or unreadable figures read as zero.
    pub fn from_value(body: &Value) -> Self {
        let wire = Wire::new(body);
        let count = |keys: &[&str]| {
            wire.integer(keys)
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0)
        };
        Self {
            total_users: count(&["totalUsers", "total_users"]),
            active_users: count(&["activeUsers", "active_users"]),
            inactive_users: count(&["inactiveUsers", "inactive_users"]),
            total_deliveries: count(&["totalDeliveries", "total_deliveries"]),
            pending_deliveries: count(&["pendingDeliveries", "pending_deliveries"]),
            completed_deliveries: count(&["completedDeliveries", "completed_deliveries"]),
            fleet_available: count(&["fleetAvailable", "fleet_available"]),
            fleet_in_maintenance: count(&["fleetInMaintenance", "fleet_in_maintenance"]),
            fuel_consumption_today: wire
                .number(&["fuelConsumptionToday", "fuel_consumption_today"])
                .unwrap_or(0.0),
            alerts: body
                .get("alerts")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Fetches reports and server metrics, keeping the last of each.
pub struct Reports {
    reports: ResourceEndpoint,
    dashboard: ResourceEndpoint,
    latest: watch::Sender<BTreeMap<ReportKind, Value>>,
    metrics: watch::Sender<Option<DashboardMetrics>>,
    errors: watch::Sender<Vec<String>>,
}

impl Reports {
    pub fn new(reports: ResourceEndpoint, dashboard: ResourceEndpoint) -> Self {
        let (latest, _) = watch::channel(BTreeMap::new());
        let (metrics, _) = watch::channel(None);
        let (errors, _) = watch::channel(Vec::new());
        Self {
            reports,
            dashboard,
            latest,
            metrics,
            errors,
        }
    }

    /// Load one report. The body comes back as the server sent it; an
    /// empty body reads as `null`.
    pub async fn fetch(&self, kind: ReportKind) -> Result<Value, CoreError> {
        self.errors.send_modify(Vec::clear);

        match self.reports.read(kind.sub_path(), &[]).await {
            Ok(response) => {
                let body = response.body.unwrap_or(Value::Null);
                debug!(report = %kind, "report loaded");
                self.latest.send_modify(|latest| {
                    latest.insert(kind, body.clone());
                });
                Ok(body)
            }
            Err(err) => Err(self.fail(err.into(), &format!("Failed to load {}", kind.label()))),
        }
    }

    pub async fn fetch_metrics(&self) -> Result<DashboardMetrics, CoreError> {
        self.errors.send_modify(Vec::clear);

        match self.dashboard.list(&[]).await {
            Ok(response) => {
                let metrics = DashboardMetrics::from_response(&response);
                self.metrics.send_replace(Some(metrics.clone()));
                Ok(metrics)
            }
            Err(err) => Err(self.fail(err.into(), "Failed to load dashboard metrics")),
        }
    }

    pub fn report(&self, kind: ReportKind) -> Option<Value> {
        self.latest.borrow().get(&kind).cloned()
    }

    pub fn metrics(&self) -> Option<DashboardMetrics> {
        self.metrics.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    fn fail(&self, err: CoreError, fallback: &str) -> CoreError {
        let message = user_message(&err, fallback);
        error!(error = %err, "{message}");
        self.errors.send_modify(|errors| errors.push(message));
        err
    }
}

impl std::fmt::Debug for Reports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reports")
            .field("reports", &self.reports.path())
            .field("dashboard", &self.dashboard.path())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_metrics_read_as_zero() {
        let metrics = DashboardMetrics::from_value(&json!({
            "totalUsers": 12,
            "activeUsers": "9",
            "fleetAvailable": null,
            "fuelConsumptionToday": 140.5,
            "alerts": [{ "type": "maintenance", "vehicleId": 3 }],
        }));
        assert_eq!(metrics.total_users, 12);
        assert_eq!(metrics.active_users, 9);
        assert_eq!(metrics.inactive_users, 0);
        assert_eq!(metrics.fleet_available, 0);
        assert!((metrics.fuel_consumption_today - 140.5).abs() < f64::EPSILON);
        assert_eq!(metrics.alerts.len(), 1);

        assert_eq!(
            DashboardMetrics::from_value(&json!("not an object")),
            DashboardMetrics::default()
        );
    }

    #[test]
    fn report_kinds_parse_and_locate() {
        assert_eq!(
            "unified-operations".parse::<ReportKind>().unwrap(),
            ReportKind::UnifiedOperations
        );
        assert_eq!("Fuel".parse::<ReportKind>().unwrap(), ReportKind::Fuel);
        assert_eq!(ReportKind::Maintenance.sub_path(), "maintenance/summary");
        assert!("weekly".parse::<ReportKind>().is_err());
    }
}
