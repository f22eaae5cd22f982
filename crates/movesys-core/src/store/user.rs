// Account operations on the user store.

use std::sync::Arc;

use serde_json::json;

use super::EntityStore;
use crate::assemble::UserAssembler;
use crate::error::CoreError;
use crate::model::{EntityId, User, UserStatus};
use crate::stream::Snapshot;

impl EntityStore<UserAssembler> {
    /// Replace the cache with the users holding `role`.
    pub async fn fetch_by_role(&self, role: &str) -> Result<Snapshot<User>, CoreError> {
        self.fetch_all(&[("role".to_owned(), role.to_owned())]).await
    }

    pub async fn fetch_active(&self) -> Result<Snapshot<User>, CoreError> {
        self.fetch_all(&[("status".to_owned(), UserStatus::Active.to_string())])
            .await
    }

    /// Activate or deactivate an account. The server takes the status in
    /// lowercase.
    pub async fn update_status(
        &self,
        id: &EntityId,
        status: UserStatus,
    ) -> Result<Arc<User>, CoreError> {
        self.patch(id, &json!({ "status": status.as_ref() })).await
    }
}
