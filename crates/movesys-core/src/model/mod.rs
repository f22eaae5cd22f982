// ── Canonical domain model ──
//
// One plain record per domain. Field names are fixed regardless of which
// wire casing the server used; derived attributes are computed on read.

pub mod delivery;
pub mod entity_id;
pub mod fuel;
pub mod maintenance;
pub mod user;
pub mod vehicle;

use std::borrow::Cow;

pub use delivery::{Delivery, DeliveryStatus};
pub use entity_id::EntityId;
pub use fuel::{FuelEntry, FuelType};
pub use maintenance::{MaintenanceRecord, MaintenanceStatus, MaintenanceType, Part};
pub use user::{User, UserStatus};
pub use vehicle::{MaintenanceOutlook, Vehicle, VehicleStatus, VehicleType};

/// Behavior shared by every canonical entity, used by stores for cache
/// identity and by filter views.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Singular name used in messages ("vehicle").
    const KIND: &'static str;
    /// Plural name used in messages ("vehicles").
    const PLURAL: &'static str;
    /// Category filters this entity supports, by name.
    const FACETS: &'static [&'static str];

    /// Server-assigned id. `None` only for entities not yet created.
    fn id(&self) -> Option<&EntityId>;

    /// Current value of a category filter (`"status"`, `"type"`, ...).
    fn facet(&self, name: &str) -> Option<&str>;

    /// Fields matched by the free-text search.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// Whole days from `now` until `then`, rounded up.
pub(crate) fn days_until(
    now: chrono::DateTime<chrono::Utc>,
    then: chrono::DateTime<chrono::Utc>,
) -> i64 {
    let seconds = (then - now).num_seconds();
    seconds.div_euclid(86_400) + i64::from(seconds.rem_euclid(86_400) != 0)
}
