// ── Filter views ──
//
// Filter state is ephemeral and per store. Views are computed from the
// current snapshot on every read and never cached.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::Entity;

/// Facet value meaning "no filter".
pub const ALL: &str = "all";

/// Free-text query plus selected category filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    /// Facet name to selected value. Absent means [`ALL`].
    pub facets: BTreeMap<String, String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.facets.is_empty()
    }

    /// Select `value` for a facet; `"all"` or a blank value clears it.
    pub(crate) fn select(&mut self, facet: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            self.facets.remove(facet);
        } else {
            self.facets.insert(facet.to_owned(), value.to_owned());
        }
    }
}

/// Entities matching every selected facet and, if a query is set,
/// containing it (case-insensitively) in one of their search fields.
pub fn apply_filters<T: Entity>(items: &[Arc<T>], state: &FilterState) -> Vec<Arc<T>> {
    let needle = state.query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            state.facets.iter().all(|(facet, wanted)| {
                item.facet(facet)
                    .is_some_and(|value| value.eq_ignore_ascii_case(wanted))
            })
        })
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Vehicle, VehicleStatus, VehicleType};

    fn fleet() -> Vec<Arc<Vehicle>> {
        [
            ("ABC-123", "Volvo", VehicleType::Truck, VehicleStatus::Available),
            ("VAN-001", "Mercedes", VehicleType::Van, VehicleStatus::InUse),
            ("TRK-777", "Scania", VehicleType::Truck, VehicleStatus::Maintenance),
        ]
        .into_iter()
        .map(|(plate, brand, vehicle_type, status)| {
            Arc::new(Vehicle {
                license_plate: plate.into(),
                brand: brand.into(),
                vehicle_type,
                status,
                ..Vehicle::default()
            })
        })
        .collect()
    }

    fn plates(items: &[Arc<Vehicle>]) -> Vec<&str> {
        items.iter().map(|v| v.license_plate.as_str()).collect()
    }

    #[test]
    fn empty_state_keeps_everything() {
        let fleet = fleet();
        assert_eq!(apply_filters(&fleet, &FilterState::default()).len(), 3);
    }

    #[test]
    fn facets_and_query_combine() {
        let fleet = fleet();
        let mut state = FilterState::default();
        state.select("type", "truck");
        assert_eq!(plates(&apply_filters(&fleet, &state)), ["ABC-123", "TRK-777"]);

        state.query = "scan".into();
        assert_eq!(plates(&apply_filters(&fleet, &state)), ["TRK-777"]);
    }

    #[test]
    fn query_is_case_insensitive() {
        let fleet = fleet();
        let state = FilterState {
            query: "  van-0 ".into(),
            ..FilterState::default()
        };
        assert_eq!(plates(&apply_filters(&fleet, &state)), ["VAN-001"]);
    }

    #[test]
    fn all_clears_a_facet() {
        let mut state = FilterState::default();
        state.select("status", "in_use");
        assert!(!state.is_empty());
        state.select("status", "All");
        assert!(state.is_empty());
    }
}
