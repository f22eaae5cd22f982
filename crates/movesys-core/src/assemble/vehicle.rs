use serde_json::{Value, json};

use super::{Assembler, Wire, text_or_null, timestamp_value};
use crate::model::{FuelType, Vehicle, VehicleStatus, VehicleType};

/// The representative assembler: the backend calls the plate `Plate`, older
/// deployments `plate`, `licensePlate` or `license_plate`; all of them land
/// in `Vehicle::license_plate`. Writes use `plate`.
pub struct VehicleAssembler;

impl Assembler for VehicleAssembler {
    type Entity = Vehicle;

    const ENVELOPE_KEYS: &'static [&'static str] = &["vehicles"];

    fn to_entity(resource: &Value) -> Vehicle {
        let wire = Wire::new(resource);
        Vehicle {
            id: wire.id(&["id", "Id"]),
            license_plate: wire.text_or_empty(&["Plate", "plate", "licensePlate", "license_plate"]),
            brand: wire.text_or_empty(&["Brand", "brand"]),
            model: wire.text_or_empty(&["Model", "model"]),
            year: wire.integer(&["Year", "year"]),
            color: wire.text_or_empty(&["Color", "color"]),
            vehicle_type: wire
                .choice(&["Type", "type"])
                .unwrap_or(VehicleType::Truck),
            capacity: wire.number(&["Capacity", "capacity"]),
            fuel_type: wire
                .choice(&["FuelType", "fuelType", "fuel_type"])
                .unwrap_or(FuelType::Gasoline),
            status: wire
                .choice(&["Status", "status"])
                .unwrap_or(VehicleStatus::Available),
            current_driver: wire
                .text(&["CurrentDriver", "currentDriver", "current_driver"])
                .filter(|driver| !driver.trim().is_empty()),
            mileage: wire.integer(&["Mileage", "mileage"]).unwrap_or(0),
            last_maintenance: wire.timestamp(&[
                "LastMaintenance",
                "lastMaintenance",
                "last_maintenance",
            ]),
            next_maintenance: wire.timestamp(&[
                "NextMaintenance",
                "nextMaintenance",
                "next_maintenance",
            ]),
        }
    }

    /// Only what the operator enters; driver assignment and maintenance
    /// dates are managed through their own operations.
    fn to_create_resource(vehicle: &Vehicle) -> Value {
        json!({
            "plate": vehicle.license_plate,
            "brand": vehicle.brand,
            "model": vehicle.model,
            "year": vehicle.year,
            "color": text_or_null(&vehicle.color),
            "type": vehicle.vehicle_type.as_ref(),
            "capacity": vehicle.capacity,
            "fuelType": vehicle.fuel_type.as_ref(),
            "status": vehicle.status.as_ref(),
            "mileage": vehicle.mileage,
        })
    }

    fn to_update_resource(vehicle: &Vehicle) -> Value {
        let mut body = Self::to_create_resource(vehicle);
        if let Some(fields) = body.as_object_mut() {
            if let Some(ref driver) = vehicle.current_driver {
                fields.insert("currentDriver".into(), json!(driver));
            }
            if vehicle.last_maintenance.is_some() {
                fields.insert(
                    "lastMaintenance".into(),
                    timestamp_value(vehicle.last_maintenance),
                );
            }
            if vehicle.next_maintenance.is_some() {
                fields.insert(
                    "nextMaintenance".into(),
                    timestamp_value(vehicle.next_maintenance),
                );
            }
        }
        body
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityId;

    #[test]
    fn plate_priority_favors_pascal_case() {
        let all = json!({ "Plate": "P-1", "plate": "p-2", "licensePlate": "L-3" });
        assert_eq!(VehicleAssembler::to_entity(&all).license_plate, "P-1");

        let lower = json!({ "plate": "p-2", "licensePlate": "L-3" });
        assert_eq!(VehicleAssembler::to_entity(&lower).license_plate, "p-2");

        for resource in [
            json!({ "Plate": "ABC-123" }),
            json!({ "plate": "ABC-123" }),
            json!({ "licensePlate": "ABC-123" }),
            json!({ "license_plate": "ABC-123" }),
        ] {
            assert_eq!(VehicleAssembler::to_entity(&resource).license_plate, "ABC-123");
        }
    }

    #[test]
    fn defaults_for_missing_fields() {
        let vehicle = VehicleAssembler::to_entity(&json!({ "Id": 4 }));
        assert_eq!(vehicle.id, Some(EntityId::Numeric(4)));
        assert_eq!(vehicle.vehicle_type, VehicleType::Truck);
        assert_eq!(vehicle.fuel_type, FuelType::Gasoline);
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(vehicle.mileage, 0);
        assert_eq!(vehicle.year, None);
        assert_eq!(vehicle.current_driver, None);
    }

    #[test]
    fn create_coerces_numbers_and_nulls_blank_color() {
        let vehicle = VehicleAssembler::to_entity(&json!({
            "plate": "XYZ-1",
            "year": "2018.7",
            "capacity": "15",
            "mileage": "120000",
            "currentDriver": "Juan",
            "type": "van",
        }));
        assert_eq!(
            VehicleAssembler::to_create_resource(&vehicle),
            json!({
                "plate": "XYZ-1",
                "brand": "",
                "model": "",
                "year": 2019,
                "color": null,
                "type": "van",
                "capacity": 15.0,
                "fuelType": "gasoline",
                "status": "available",
                "mileage": 120_000,
            })
        );
    }

    #[test]
    fn update_adds_driver_and_schedule_when_set() {
        let next = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let vehicle = Vehicle {
            current_driver: Some("Juan".into()),
            next_maintenance: Some(next),
            ..Vehicle::default()
        };
        let body = VehicleAssembler::to_update_resource(&vehicle);
        assert_eq!(body["currentDriver"], json!("Juan"));
        assert_eq!(body["nextMaintenance"], json!("2024-09-01T00:00:00Z"));
        assert!(body.get("lastMaintenance").is_none());
        assert!(body.get("id").is_none());
    }

    #[test]
    fn round_trip_through_update_is_stable() {
        let vehicle = VehicleAssembler::to_entity(&json!({
            "Id": 11,
            "Plate": "ABC-123",
            "Brand": "Volvo",
            "Model": "FH16",
            "Year": 2020,
            "Color": "white",
            "Type": "truck",
            "Capacity": 25.5,
            "FuelType": "diesel",
            "Status": "in_use",
            "CurrentDriver": "Ana",
            "Mileage": 80_500,
            "LastMaintenance": "2024-01-10",
            "NextMaintenance": "2024-07-10T00:00:00Z",
        }));
        let again = VehicleAssembler::to_entity(&VehicleAssembler::to_update_resource(&vehicle));
        assert_eq!(Vehicle { id: vehicle.id.clone(), ..again }, vehicle);
    }
}
