// ── Fuel domain types ──

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Entity, EntityId};

/// Fuel or energy source. Shared by vehicles and fuel entries, which
/// default to different variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FuelType {
    #[default]
    Diesel,
    Gasoline,
    Electric,
    Hybrid,
}

/// One refuelling of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEntry {
    pub id: Option<EntityId>,
    pub vehicle_id: Option<EntityId>,
    /// Server-derived from `vehicle_id`; never written back.
    pub vehicle_plate: String,
    pub liters: f64,
    pub cost: f64,
    pub fuel_type: FuelType,
    pub station: String,
    pub filled_at: Option<DateTime<Utc>>,
    pub odometer: Option<f64>,
    pub notes: String,
}

impl FuelEntry {
    /// Cost per liter, or 0 when no liters were recorded.
    pub fn cost_per_liter(&self) -> f64 {
        if self.liters.abs() < f64::EPSILON {
            0.0
        } else {
            self.cost / self.liters
        }
    }
}

impl Entity for FuelEntry {
    const KIND: &'static str = "fuel entry";
    const PLURAL: &'static str = "fuel entries";
    const FACETS: &'static [&'static str] = &["fuel_type"];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            "fuel_type" => Some(self.fuel_type.as_ref()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.vehicle_plate),
            Cow::Borrowed(&self.station),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_per_liter_guards_zero() {
        let entry = FuelEntry {
            liters: 0.0,
            cost: 120.0,
            ..FuelEntry::default()
        };
        assert!(entry.cost_per_liter().abs() < f64::EPSILON);

        let entry = FuelEntry {
            liters: 40.0,
            cost: 200.0,
            ..FuelEntry::default()
        };
        assert!((entry.cost_per_liter() - 5.0).abs() < f64::EPSILON);
    }
}
