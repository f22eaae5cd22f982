use serde_json::{Map, Value, json};

use super::{Assembler, Wire, id_value, timestamp_value};
use crate::model::{Delivery, DeliveryStatus};

pub struct DeliveryAssembler;

impl Assembler for DeliveryAssembler {
    type Entity = Delivery;

    const ENVELOPE_KEYS: &'static [&'static str] = &["deliveries"];

    fn to_entity(resource: &Value) -> Delivery {
        let wire = Wire::new(resource);
        Delivery {
            id: wire.id(&["id", "Id"]),
            code: wire.text_or_empty(&["Code", "code"]),
            customer_name: wire.text_or_empty(&["CustomerName", "customerName", "customer_name"]),
            address: wire.text_or_empty(&["Address", "address"]),
            origin_province: wire.text_or_empty(&[
                "OriginProvince",
                "originProvince",
                "origin_province",
            ]),
            destination_province: wire.text_or_empty(&[
                "DestinationProvince",
                "destinationProvince",
                "destination_province",
            ]),
            scheduled_at: wire.timestamp(&["ScheduledAt", "scheduledAt", "scheduled_at"]),
            status: wire
                .choice(&["Status", "status"])
                .unwrap_or(DeliveryStatus::Pending),
            vehicle_id: wire.id(&["VehicleId", "vehicleId", "vehicle_id"]),
            vehicle_plate: wire.text_or_empty(&["VehiclePlate", "vehiclePlate", "vehicle_plate"]),
            driver_name: wire.text_or_empty(&["DriverName", "driverName", "driver_name"]),
            distance_km: wire.number(&["DistanceKm", "distanceKm", "distance_km"]),
            eta_minutes: wire.integer(&["EtaMinutes", "etaMinutes", "eta_minutes"]),
        }
    }

    fn to_create_resource(delivery: &Delivery) -> Value {
        json!({
            "code": delivery.code,
            "customerName": delivery.customer_name,
            "address": delivery.address,
            "originProvince": delivery.origin_province,
            "destinationProvince": delivery.destination_province,
            "scheduledAt": timestamp_value(delivery.scheduled_at),
            "status": delivery.status.as_ref(),
            "vehicleId": id_value(delivery.vehicle_id.as_ref()),
            "vehiclePlate": delivery.vehicle_plate,
            "driverName": delivery.driver_name,
            "distanceKm": delivery.distance_km,
            "etaMinutes": delivery.eta_minutes,
        })
    }

    /// Required fields always; optional ones only when they carry a value,
    /// so an update never blanks server-side data.
    fn to_update_resource(delivery: &Delivery) -> Value {
        let mut body = Map::new();
        body.insert("code".into(), json!(delivery.code));
        body.insert("customerName".into(), json!(delivery.customer_name));
        body.insert("address".into(), json!(delivery.address));
        body.insert("originProvince".into(), json!(delivery.origin_province));
        body.insert(
            "destinationProvince".into(),
            json!(delivery.destination_province),
        );
        body.insert("status".into(), json!(delivery.status.as_ref()));

        if delivery.scheduled_at.is_some() {
            body.insert("scheduledAt".into(), timestamp_value(delivery.scheduled_at));
        }
        if let Some(ref id) = delivery.vehicle_id {
            body.insert("vehicleId".into(), id_value(Some(id)));
        }
        if !delivery.vehicle_plate.is_empty() {
            body.insert("vehiclePlate".into(), json!(delivery.vehicle_plate));
        }
        if !delivery.driver_name.is_empty() {
            body.insert("driverName".into(), json!(delivery.driver_name));
        }
        if let Some(km) = delivery.distance_km {
            body.insert("distanceKm".into(), json!(km));
        }
        if let Some(minutes) = delivery.eta_minutes {
            body.insert("etaMinutes".into(), json!(minutes));
        }
        Value::Object(body)
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
    fn reads_mixed_casing_and_coerces_numbers() {
        let delivery = DeliveryAssembler::to_entity(&json!({
            "Id": "12",
            "Code": "DLV-001",
            "customerName": "Comercial Andina",
            "origin_province": "Lima",
            "DestinationProvince": "Cusco",
            "scheduledAt": "2024-07-01T14:00:00Z",
            "status": "IN_TRANSIT",
            "vehicle_id": 4,
            "distance_km": "1105.5",
            "EtaMinutes": 1320.4,
        }));

        assert_eq!(delivery.id, Some(EntityId::Numeric(12)));
        assert_eq!(delivery.code, "DLV-001");
        assert_eq!(delivery.origin_province, "Lima");
        assert_eq!(delivery.destination_province, "Cusco");
        assert_eq!(
            delivery.scheduled_at,
            Some(Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap())
        );
        assert_eq!(delivery.status, DeliveryStatus::InTransit);
        assert_eq!(delivery.vehicle_id, Some(EntityId::Numeric(4)));
        assert_eq!(delivery.distance_km, Some(1105.5));
        assert_eq!(delivery.eta_minutes, Some(1320));
    }

    #[test]
    fn unknown_status_degrades_to_pending() {
        let delivery = DeliveryAssembler::to_entity(&json!({ "status": "lost_in_space" }));
        assert!(delivery.is_pending());
    }

    #[test]
    fn update_omits_empty_optionals() {
        let delivery = Delivery {
            id: Some(EntityId::Numeric(5)),
            code: "DLV-9".into(),
            status: DeliveryStatus::Completed,
            ..Delivery::default()
        };
        assert_eq!(
            DeliveryAssembler::to_update_resource(&delivery),
            json!({
                "code": "DLV-9",
                "customerName": "",
                "address": "",
                "originProvince": "",
                "destinationProvince": "",
                "status": "completed",
            })
        );
    }

    #[test]
    fn create_carries_every_field() {
        let body = DeliveryAssembler::to_create_resource(&Delivery::default());
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 12);
        assert!(body.get("id").is_none());
        assert_eq!(body["scheduledAt"], Value::Null);
    }

    #[test]
    fn round_trip_is_stable() {
        let delivery = DeliveryAssembler::to_entity(&json!({
            "id": 1,
            "code": "DLV-2",
            "scheduledAt": "2024-07-01T14:00:00.250Z",
            "vehicleId": 8,
            "vehiclePlate": "XYZ-987",
            "driverName": "Pedro",
            "distanceKm": 42.0,
            "etaMinutes": 55,
        }));
        for body in [
            DeliveryAssembler::to_create_resource(&delivery),
            DeliveryAssembler::to_update_resource(&delivery),
        ] {
            let again = DeliveryAssembler::to_entity(&body);
            assert_eq!(Delivery { id: delivery.id.clone(), ..again }, delivery);
        }
    }
}
