// ── Delivery domain types ──

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Entity, EntityId};

/// Lifecycle of a delivery order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

/// A delivery order between two provinces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Option<EntityId>,
    pub code: String,
    pub customer_name: String,
    pub address: String,
    pub origin_province: String,
    pub destination_province: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: DeliveryStatus,
    pub vehicle_id: Option<EntityId>,
    pub vehicle_plate: String,
    pub driver_name: String,
    pub distance_km: Option<f64>,
    pub eta_minutes: Option<i64>,
}

impl Delivery {
    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == DeliveryStatus::Completed
    }
}

impl Entity for Delivery {
    const KIND: &'static str = "delivery";
    const PLURAL: &'static str = "deliveries";
    const FACETS: &'static [&'static str] = &["status"];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(self.status.as_ref()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.code),
            Cow::Borrowed(&self.customer_name),
            Cow::Borrowed(&self.address),
        ]
    }
}
