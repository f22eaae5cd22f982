// Fleet-specific operations on the vehicle store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use super::EntityStore;
use crate::assemble::{VehicleAssembler, timestamp_value};
use crate::error::CoreError;
use crate::model::{EntityId, Vehicle, VehicleStatus};
use crate::stream::Snapshot;

impl EntityStore<VehicleAssembler> {
    pub async fn update_status(
        &self,
        id: &EntityId,
        status: VehicleStatus,
    ) -> Result<Arc<Vehicle>, CoreError> {
        self.patch(id, &json!({ "status": status.as_ref() })).await
    }

    /// Put a driver behind the wheel; the vehicle goes `in_use`.
    pub async fn assign_driver(
        &self,
        id: &EntityId,
        driver: &str,
    ) -> Result<Arc<Vehicle>, CoreError> {
        let body = json!({
            "currentDriver": driver,
            "status": VehicleStatus::InUse.as_ref(),
        });
        self.patch(id, &body).await
    }

    /// Clear the driver; the vehicle goes back to `available`.
    pub async fn unassign_driver(&self, id: &EntityId) -> Result<Arc<Vehicle>, CoreError> {
        let body = json!({
            "currentDriver": Value::Null,
            "status": VehicleStatus::Available.as_ref(),
        });
        self.patch(id, &body).await
    }

    pub async fn update_mileage(
        &self,
        id: &EntityId,
        mileage: i64,
    ) -> Result<Arc<Vehicle>, CoreError> {
        self.patch(id, &json!({ "mileage": mileage })).await
    }

    /// Book the next service date.
    pub async fn schedule_maintenance(
        &self,
        id: &EntityId,
        next_maintenance: DateTime<Utc>,
    ) -> Result<Arc<Vehicle>, CoreError> {
        let body = json!({ "next_maintenance": timestamp_value(Some(next_maintenance)) });
        self.patch(id, &body).await
    }

    pub async fn fetch_by_status(
        &self,
        status: VehicleStatus,
    ) -> Result<Snapshot<Vehicle>, CoreError> {
        self.fetch_all(&[("status".to_owned(), status.to_string())])
            .await
    }

    pub async fn fetch_available(&self) -> Result<Snapshot<Vehicle>, CoreError> {
        self.fetch_by_status(VehicleStatus::Available).await
    }

    /// Replace the cache with the vehicles the server reports as due for
    /// service.
    pub async fn fetch_maintenance_due(&self) -> Result<Snapshot<Vehicle>, CoreError> {
        self.fetch_all(&[("maintenance_due".to_owned(), "true".to_owned())])
            .await
    }
}
