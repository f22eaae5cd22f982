use serde_json::{Value, json};
use tracing::warn;

use super::{Assembler, Wire, id_value, text_or_null, timestamp_value};
use crate::model::{MaintenanceRecord, MaintenanceStatus, MaintenanceType, Part};

/// Maintenance records come back snake_case or camelCase and are written
/// camelCase. The server stores `parts` as a JSON-encoded string.
pub struct MaintenanceAssembler;

impl Assembler for MaintenanceAssembler {
    type Entity = MaintenanceRecord;

    const ENVELOPE_KEYS: &'static [&'static str] = &["maintenances", "maintenanceRecords"];

    fn to_entity(resource: &Value) -> MaintenanceRecord {
        let wire = Wire::new(resource);
        MaintenanceRecord {
            id: wire.id(&["id", "Id"]),
            vehicle_id: wire.id(&["vehicle_id", "vehicleId"]),
            vehicle_plate: wire.text_or_empty(&["vehicle_plate", "vehiclePlate"]),
            model: wire.text_or_empty(&["model"]),
            maintenance_type: wire
                .choice(&["maintenance_type", "maintenanceType"])
                .unwrap_or(MaintenanceType::Preventive),
            description: wire.text_or_empty(&["description"]).trim().to_owned(),
            cost: wire.number(&["cost"]).unwrap_or(0.0),
            mileage: wire.integer(&["mileage"]),
            maintenance_date: wire.timestamp(&["maintenance_date", "maintenanceDate"]),
            next_maintenance_date: wire
                .timestamp(&["next_maintenance_date", "nextMaintenanceDate"]),
            next_maintenance_mileage: wire
                .integer(&["next_maintenance_mileage", "nextMaintenanceMileage"]),
            provider: wire.text_or_empty(&["provider"]),
            parts: read_parts(resource.get("parts")),
            mechanic: wire.text_or_empty(&["mechanic"]),
            notes: wire.text_or_empty(&["notes"]),
            status: wire
                .choice(&["status"])
                .unwrap_or(MaintenanceStatus::Scheduled),
        }
    }

    fn to_create_resource(record: &MaintenanceRecord) -> Value {
        json!({
            "vehicleId": id_value(record.vehicle_id.as_ref()),
            "vehiclePlate": record.vehicle_plate,
            "model": text_or_null(&record.model),
            "maintenanceType": record.maintenance_type.as_ref(),
            "description": record.description.trim(),
            "cost": record.cost,
            "mileage": record.mileage,
            "maintenanceDate": timestamp_value(record.maintenance_date),
            "nextMaintenanceDate": timestamp_value(record.next_maintenance_date),
            "nextMaintenanceMileage": record.next_maintenance_mileage,
            "provider": record.provider,
            "parts": write_parts(&record.parts),
            "mechanic": text_or_null(&record.mechanic),
            "notes": text_or_null(&record.notes),
            "status": record.status.as_ref(),
        })
    }
}

/// Parts arrive as an array or as a JSON-encoded string of one. Each row is
/// read on its own, so one malformed cost never costs the others. Blank
/// rows are dropped.
fn read_parts(raw: Option<&Value>) -> Vec<Part> {
    let decoded;
    let rows = match raw {
        Some(Value::Array(items)) => items,
        Some(Value::String(encoded)) if !encoded.trim().is_empty() => {
            match serde_json::from_str::<Value>(encoded) {
                Ok(Value::Array(items)) => {
                    decoded = items;
                    &decoded
                }
                Ok(_) => {
                    warn!("maintenance parts string does not hold an array");
                    return Vec::new();
                }
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable maintenance parts");
                    return Vec::new();
                }
            }
        }
        _ => return Vec::new(),
    };
    rows.iter()
        .filter(|row| row.is_object())
        .map(|row| {
            let wire = Wire::new(row);
            Part {
                name: wire.text_or_empty(&["name"]),
                cost: wire.number(&["cost"]).unwrap_or(0.0),
            }
        })
        .filter(|part| !part.is_blank())
        .collect()
}

/// Non-blank parts as a JSON string, or `null` when there are none.
fn write_parts(parts: &[Part]) -> Value {
    let kept: Vec<&Part> = parts.iter().filter(|p| !p.is_blank()).collect();
    if kept.is_empty() {
        return Value::Null;
    }
    serde_json::to_string(&kept).map_or(Value::Null, Value::String)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityId;

    fn oil_change() -> Value {
        json!({
            "id": 21,
            "vehicle_id": 4,
            "vehiclePlate": "ABC-123",
            "maintenanceType": "corrective",
            "description": "  Oil change  ",
            "cost": "350.00",
            "mileage": 80500,
            "maintenance_date": "2024-03-01",
            "nextMaintenanceDate": "2024-09-01T00:00:00Z",
            "next_maintenance_mileage": 90500,
            "provider": "Taller Sur",
            "parts": "[{\"name\":\"Filter\",\"cost\":25.5},{\"name\":\"\",\"cost\":0}]",
            "mechanic": "Raul",
            "status": "completed",
        })
    }

    #[test]
    fn reads_string_encoded_parts_and_mixed_casing() {
        let record = MaintenanceAssembler::to_entity(&oil_change());
        assert_eq!(record.id, Some(EntityId::Numeric(21)));
        assert_eq!(record.vehicle_id, Some(EntityId::Numeric(4)));
        assert_eq!(record.maintenance_type, MaintenanceType::Corrective);
        assert_eq!(record.description, "Oil change");
        assert_eq!(record.cost, 350.0);
        assert_eq!(
            record.parts,
            vec![Part {
                name: "Filter".into(),
                cost: 25.5
            }]
        );
        assert_eq!(record.status, MaintenanceStatus::Completed);
    }

    #[test]
    fn reads_array_parts() {
        let record = MaintenanceAssembler::to_entity(&json!({
            "parts": [{ "name": "Belt", "cost": 40 }, { "cost": 10 }]
        }));
        assert_eq!(record.parts.len(), 2);
        assert!((record.total_parts_cost() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn text_and_null_costs_keep_every_part() {
        let record = MaintenanceAssembler::to_entity(&json!({
            "parts": [
                { "name": "oil filter", "cost": "12.5" },
                { "name": "belt", "cost": 30 },
                { "name": "gasket", "cost": null },
            ]
        }));
        assert_eq!(
            record.parts,
            vec![
                Part { name: "oil filter".into(), cost: 12.5 },
                Part { name: "belt".into(), cost: 30.0 },
                Part { name: "gasket".into(), cost: 0.0 },
            ]
        );

        let encoded = MaintenanceAssembler::to_entity(&json!({
            "parts": "[{\"name\":\"wiper\",\"cost\":\"8\"},{\"name\":\"fuse\",\"cost\":null}]"
        }));
        assert_eq!(encoded.parts.len(), 2);
        assert!((encoded.total_parts_cost() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_for_missing_fields() {
        let record = MaintenanceAssembler::to_entity(&json!({ "parts": "not json" }));
        assert_eq!(record.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(record.status, MaintenanceStatus::Scheduled);
        assert_eq!(record.cost, 0.0);
        assert!(record.parts.is_empty());
    }

    #[test]
    fn write_encodes_parts_as_string() {
        let record = MaintenanceAssembler::to_entity(&oil_change());
        let body = MaintenanceAssembler::to_create_resource(&record);
        assert_eq!(body["parts"], json!("[{\"name\":\"Filter\",\"cost\":25.5}]"));
        assert_eq!(body["description"], json!("Oil change"));
        assert_eq!(body["vehicleId"], json!(4));
        assert_eq!(body["notes"], Value::Null);
        assert!(body.get("id").is_none());

        let empty = MaintenanceAssembler::to_create_resource(&MaintenanceRecord::default());
        assert_eq!(empty["parts"], Value::Null);
    }

    #[test]
    fn round_trip_is_stable() {
        let record = MaintenanceAssembler::to_entity(&oil_change());
        let again = MaintenanceAssembler::to_entity(&MaintenanceAssembler::to_update_resource(&record));
        assert_eq!(
            MaintenanceRecord {
                id: record.id.clone(),
                ..again
            },
            record
        );
    }
}
