// ── User domain types ──

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Entity, EntityId};

/// Account status of a console user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// A driver or back-office user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub phone_number: String,
    pub role: String,
    pub status: UserStatus,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: None,
            first_name: String::new(),
            last_name: String::new(),
            dni: String::new(),
            phone_number: String::new(),
            role: User::DEFAULT_ROLE.into(),
            status: UserStatus::Active,
        }
    }
}

impl User {
    pub const DEFAULT_ROLE: &'static str = "driver";

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const PLURAL: &'static str = "users";
    const FACETS: &'static [&'static str] = &["role", "status"];

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn facet(&self, name: &str) -> Option<&str> {
        match name {
            "role" => Some(&self.role),
            "status" => Some(self.status.as_ref()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.full_name()),
            Cow::Borrowed(&self.dni),
            Cow::Borrowed(&self.phone_number),
        ]
    }
}
