// ── Wire-to-canonical assemblers ──
//
// Backends disagree on casing and naming: the same field may arrive as
// `Plate`, `plate` or `licensePlate`. Each assembler probes a fixed list of
// key variants per field, takes the first one present, and falls back to a
// domain default. The write direction emits exactly one agreed shape.

mod delivery;
mod fuel;
mod maintenance;
mod user;
mod vehicle;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::warn;

use movesys_api::ApiResponse;

use crate::model::{Entity, EntityId};

pub use delivery::DeliveryAssembler;
pub use fuel::FuelEntryAssembler;
pub use maintenance::MaintenanceAssembler;
pub use user::UserAssembler;
pub use vehicle::VehicleAssembler;

/// Bidirectional mapping between wire resources and one canonical entity.
pub trait Assembler: Send + Sync + 'static {
    type Entity: Entity;

    /// Keys a list response may nest its resource array under.
    const ENVELOPE_KEYS: &'static [&'static str];

    /// Read one wire resource. Never fails; missing fields take defaults.
    fn to_entity(resource: &Value) -> Self::Entity;

    /// Body for `POST {collection}`. Never carries the id.
    fn to_create_resource(entity: &Self::Entity) -> Value;

    /// Body for `PUT {collection}/{id}`. The id travels in the URL.
    fn to_update_resource(entity: &Self::Entity) -> Value {
        Self::to_create_resource(entity)
    }

    /// Read every resource in a list response.
    ///
    /// Accepts a bare array or an array nested under one of
    /// [`ENVELOPE_KEYS`](Self::ENVELOPE_KEYS). Anything else yields an empty
    /// list and a diagnostic.
    fn to_entities(response: &ApiResponse) -> Vec<Self::Entity> {
        let kind = <Self::Entity as Entity>::PLURAL;
        if !response.status.is_success() {
            warn!(status = %response.status, kind, "discarding list response with failure status");
            return Vec::new();
        }
        let Some(body) = response.body.as_ref() else {
            return Vec::new();
        };
        match resource_array(body, Self::ENVELOPE_KEYS) {
            Some(resources) => resources.iter().map(Self::to_entity).collect(),
            None => {
                warn!(kind, "list response contains no resource array");
                Vec::new()
            }
        }
    }
}

fn resource_array<'a>(body: &'a Value, envelope_keys: &[&str]) -> Option<&'a Vec<Value>> {
    body.as_array().or_else(|| {
        envelope_keys
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_array))
    })
}

// ── Read helpers ─────────────────────────────────────────────────────

/// Read-side view of one wire resource. Every accessor takes the key
/// variants in priority order; `null` and `""` count as absent.
#[derive(Clone, Copy)]
pub(crate) struct Wire<'a>(&'a Value);

impl<'a> Wire<'a> {
    pub(crate) fn new(resource: &'a Value) -> Self {
        Self(resource)
    }

    fn pick(self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .find_map(|key| self.0.get(*key).filter(|value| is_present(value)))
    }

    pub(crate) fn text(self, keys: &[&str]) -> Option<String> {
        match self.pick(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub(crate) fn text_or_empty(self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    /// Numbers, or strings that parse as numbers.
    pub(crate) fn number(self, keys: &[&str]) -> Option<f64> {
        match self.pick(keys)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Like [`number`](Self::number), rounded to the nearest integer.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub(crate) fn integer(self, keys: &[&str]) -> Option<i64> {
        if let Some(n) = self.pick(keys).and_then(Value::as_i64) {
            return Some(n);
        }
        self.number(keys)
            .filter(|n| n.is_finite())
            .map(|n| n.round() as i64)
    }

    pub(crate) fn timestamp(self, keys: &[&str]) -> Option<DateTime<Utc>> {
        self.text(keys).as_deref().and_then(parse_timestamp)
    }

    pub(crate) fn id(self, keys: &[&str]) -> Option<EntityId> {
        match self.pick(keys)? {
            Value::Number(n) => Some(
                n.as_i64()
                    .map_or_else(|| EntityId::from(n.to_string()), EntityId::Numeric),
            ),
            Value::String(s) if !s.trim().is_empty() => Some(EntityId::from(s.trim())),
            _ => None,
        }
    }

    /// Parse an enumerated value; unknown spellings yield `None`.
    pub(crate) fn choice<E: FromStr>(self, keys: &[&str]) -> Option<E> {
        self.text(keys).and_then(|s| s.trim().parse().ok())
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC), or a bare date.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ── Write helpers ────────────────────────────────────────────────────

pub(crate) fn timestamp_value(at: Option<DateTime<Utc>>) -> Value {
    at.map_or(Value::Null, |t| {
        Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    })
}

pub(crate) fn id_value(id: Option<&EntityId>) -> Value {
    match id {
        Some(EntityId::Numeric(n)) => Value::from(*n),
        Some(EntityId::Text(s)) => Value::from(s.as_str()),
        None => Value::Null,
    }
}

/// The string, or `null` when blank.
pub(crate) fn text_or_null(s: &str) -> Value {
    if s.trim().is_empty() {
        Value::Null
    } else {
        Value::from(s)
    }
}
