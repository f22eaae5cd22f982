// ── Maintenance domain types ──

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Entity, EntityId, days_until};

const UPCOMING_DAYS: i64 = 30;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MaintenanceType {
    #[default]
    Preventive,
    Corrective,
    Emergency,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MaintenanceStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// A replaced part and what it cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: f64,
}

impl Part {
    /// A part row the operator left blank.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.cost <= 0.0
    }
}

/// A service performed (or scheduled) on a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Option<EntityId>,
    pub vehicle_id: Option<EntityId>,
    pub vehicle_plate: String,
    pub model: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub mileage: Option<i64>,
    pub maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_mileage: Option<i64>,
    pub provider: String,
    pub parts: Vec<Part>,
    pub mechanic: String,
    pub notes: String,
    pub status: MaintenanceStatus,
}

impl MaintenanceRecord {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_date.is_some_and(|next| next < now)
    }

    /// Next service falls within the coming 30 days.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_date
            .map(|next| days_until(now, next))
            .is_some_and(|days| (0..=UPCOMING_DAYS).contains(&days))
    }

    pub fn total_parts_cost(&self) -> f64 {
        self.parts.iter().map(|p| p.cost).sum()
    }
}

impl Entity for MaintenanceRecord {
    const KIND: &'static str = "maintenance record";
    const PLURAL: &'static str = "maintenance records";
    const FACETS: &'static [&'static str] = &["status", "maintenance_type"];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_ref()),
            "maintenance_type" => Some(self.maintenance_type.as_ref()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.vehicle_plate),
            Cow::Borrowed(&self.description),
            Cow::Borrowed(&self.provider),
            Cow::Borrowed(&self.mechanic),
        ]
    }
}
