// ── Vehicle domain types ──

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::fuel::FuelType;
use super::{Entity, EntityId, days_until};

/// Days ahead of the next service at which a vehicle counts as "due soon".
const DUE_SOON_DAYS: i64 = 30;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VehicleType {
    #[default]
    Truck,
    Van,
    Car,
    Motorcycle,
    Trailer,
}

/// Operational status of a fleet vehicle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    OutOfService,
}

/// Where a vehicle stands relative to its next scheduled service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceOutlook {
    Overdue,
    DueSoon,
    Good,
    Unknown,
}

/// A fleet vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Option<EntityId>,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i64>,
    pub color: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub capacity: Option<f64>,
    pub fuel_type: FuelType,
    pub status: VehicleStatus,
    pub current_driver: Option<String>,
    pub mileage: i64,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            id: None,
            license_plate: String::new(),
            brand: String::new(),
            model: String::new(),
            year: None,
            color: String::new(),
            vehicle_type: VehicleType::Truck,
            capacity: None,
            fuel_type: FuelType::Gasoline,
            status: VehicleStatus::Available,
            current_driver: None,
            mileage: 0,
            last_maintenance: None,
            next_maintenance: None,
        }
    }
}

impl Vehicle {
    /// "Brand Model (PLATE)"
    pub fn full_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn is_in_use(&self) -> bool {
        self.status == VehicleStatus::InUse
    }

    pub fn is_in_maintenance(&self) -> bool {
        self.status == VehicleStatus::Maintenance
    }

    pub fn maintenance_status(&self, now: DateTime<Utc>) -> MaintenanceOutlook {
        let Some(next) = self.next_maintenance else {
            return MaintenanceOutlook::Unknown;
        };
        match days_until(now, next) {
            days if days < 0 => MaintenanceOutlook::Overdue,
            days if days <= DUE_SOON_DAYS => MaintenanceOutlook::DueSoon,
            _ => MaintenanceOutlook::Good,
        }
    }
}

impl Entity for Vehicle {
    const KIND: &'static str = "vehicle";
    const PLURAL: &'static str = "vehicles";
    const FACETS: &'static [&'static str] = &["type", "status"];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            "type" => Some(self.vehicle_type.as_ref()),
            "status" => Some(self.status.as_ref()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.license_plate),
            Cow::Borrowed(&self.brand),
            Cow::Borrowed(&self.model),
        ]
    }
}
