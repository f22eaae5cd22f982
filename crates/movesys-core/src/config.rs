// ── Console configuration ──
//
// Describes where the API lives and which collection path each domain
// uses. Built by the config crate (or directly by embedders) and handed
// to `Console::new`.

use serde::{Deserialize, Serialize};

use movesys_api::TransportConfig;

/// Collection path per domain, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub users: String,
    pub deliveries: String,
    pub vehicles: String,
    pub fuel_entries: String,
    pub maintenance: String,
    pub reports: String,
    pub dashboard: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            users: "/api/v1/users".into(),
            deliveries: "/api/v1/deliveries".into(),
            vehicles: "/api/v1/vehicles".into(),
            fuel_entries: "/api/v1/fuel-entries".into(),
            maintenance: "/maintenances".into(),
            reports: "/api/v1/reports".into(),
            dashboard: "/dashboard".into(),
        }
    }
}

/// Everything needed to build a [`Console`](crate::Console).
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    pub transport: TransportConfig,
    pub paths: EndpointPaths,
}

impl ConsoleConfig {
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            transport,
            paths: EndpointPaths::default(),
        }
    }

    pub fn with_paths(mut self, paths: EndpointPaths) -> Self {
        self.paths = paths;
        self
    }
}
