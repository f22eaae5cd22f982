use serde_json::{Value, json};

use super::{Assembler, Wire};
use crate::model::{User, UserStatus};

/// Users arrive PascalCase from the current backend and camel/snake case
/// from older deployments. Writes are camelCase.
pub struct UserAssembler;

impl Assembler for UserAssembler {
    type Entity = User;

    const ENVELOPE_KEYS: &'static [&'static str] = &["users"];

    fn to_entity(resource: &Value) -> User {
        let wire = Wire::new(resource);
        User {
            id: wire.id(&["id", "Id"]),
            first_name: wire.text_or_empty(&["FirstName", "firstName", "first_name"]),
            last_name: wire.text_or_empty(&["LastName", "lastName", "last_name"]),
            dni: wire.text_or_empty(&["Dni", "dni"]),
            phone_number: wire.text_or_empty(&["PhoneNumber", "phoneNumber", "phone_number"]),
            role: wire
                .text(&["Role", "role"])
                .filter(|role| !role.trim().is_empty())
                .unwrap_or_else(|| User::DEFAULT_ROLE.into()),
            status: wire
                .choice(&["Status", "status"])
                .unwrap_or(UserStatus::Active),
        }
    }

    fn to_create_resource(user: &User) -> Value {
        let role = if user.role.trim().is_empty() {
            User::DEFAULT_ROLE
        } else {
            user.role.as_str()
        };
        json!({
            "firstName": user.first_name,
            "lastName": user.last_name,
            "dni": user.dni,
            "phoneNumber": user.phone_number,
            "role": role,
            "status": user.status.as_ref(),
        })
    }
}
