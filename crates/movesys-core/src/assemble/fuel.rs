use serde_json::{Value, json};

use super::{Assembler, Wire, id_value, timestamp_value};
use crate::model::{FuelEntry, FuelType};

/// The fuel service speaks snake_case; camel and Pascal variants are
/// accepted on read only.
pub struct FuelEntryAssembler;

impl Assembler for FuelEntryAssembler {
    type Entity = FuelEntry;

    const ENVELOPE_KEYS: &'static [&'static str] = &["fuelEntries", "fuel_entries"];

    fn to_entity(resource: &Value) -> FuelEntry {
        let wire = Wire::new(resource);
        FuelEntry {
            id: wire.id(&["id", "Id"]),
            vehicle_id: wire.id(&["vehicle_id", "vehicleId", "VehicleId"]),
            vehicle_plate: wire.text_or_empty(&["vehicle_plate", "vehiclePlate", "VehiclePlate"]),
            liters: wire.number(&["liters", "Liters"]).unwrap_or(0.0),
            cost: wire.number(&["cost", "Cost"]).unwrap_or(0.0),
            fuel_type: wire
                .choice(&["fuel_type", "fuelType", "FuelType"])
                .unwrap_or(FuelType::Diesel),
            station: wire.text_or_empty(&["station", "Station"]),
            filled_at: wire.timestamp(&["filled_at", "filledAt", "FilledAt"]),
            odometer: wire.number(&["odometer", "Odometer"]),
            notes: wire.text_or_empty(&["notes", "Notes"]),
        }
    }

    fn to_create_resource(entry: &FuelEntry) -> Value {
        json!({
            "vehicle_id": id_value(entry.vehicle_id.as_ref()),
            "liters": entry.liters,
            "cost": entry.cost,
            "fuel_type": entry.fuel_type.as_ref(),
            "station": entry.station,
            "filled_at": timestamp_value(entry.filled_at),
            "odometer": entry.odometer,
            "notes": entry.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityId;

    #[test]
    fn snake_case_wins_over_camel_case() {
        let entry = FuelEntryAssembler::to_entity(&json!({
            "id": 1,
            "vehicle_id": 3,
            "vehicleId": 99,
            "vehiclePlate": "ABC-123",
            "liters": "45.5",
            "cost": 210,
            "fuelType": "gasoline",
            "filledAt": "2024-04-02T07:15:00Z",
        }));
        assert_eq!(entry.vehicle_id, Some(EntityId::Numeric(3)));
        assert_eq!(entry.vehicle_plate, "ABC-123");
        assert_eq!(entry.liters, 45.5);
        assert_eq!(entry.fuel_type, FuelType::Gasoline);
        assert!(entry.filled_at.is_some());
    }

    #[test]
    fn defaults_for_missing_fields() {
        let entry = FuelEntryAssembler::to_entity(&json!({ "id": 2 }));
        assert_eq!(entry.fuel_type, FuelType::Diesel);
        assert_eq!(entry.liters, 0.0);
        assert_eq!(entry.cost_per_liter(), 0.0);
        assert_eq!(entry.odometer, None);
    }

    #[test]
    fn write_is_snake_case_without_plate() {
        let entry = FuelEntryAssembler::to_entity(&json!({ "vehicle_id": 3, "vehicle_plate": "ABC-123", "liters": 40, "cost": 180.5 }));
        let body = FuelEntryAssembler::to_create_resource(&entry);
        assert_eq!(body["vehicle_id"], json!(3));
        assert_eq!(body["fuel_type"], json!("diesel"));
        assert!(body.get("vehicle_plate").is_none());
        assert!(body.get("vehiclePlate").is_none());

        let again = FuelEntryAssembler::to_entity(&body);
        assert_eq!(
            FuelEntry {
                vehicle_plate: entry.vehicle_plate.clone(),
                ..again
            },
            entry
        );
    }
}
