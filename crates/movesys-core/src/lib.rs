// movesys-core: canonical entities, assemblers and reactive stores

pub mod assemble;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod reports;
pub mod store;
pub mod stream;

pub use assemble::{
    Assembler, DeliveryAssembler, FuelEntryAssembler, MaintenanceAssembler, UserAssembler,
    VehicleAssembler,
};
pub use config::{ConsoleConfig, EndpointPaths};
pub use console::Console;
pub use dashboard::DashboardSummary;
pub use error::{CoreError, user_message};
pub use model::{
    Delivery, DeliveryStatus, Entity, EntityId, FuelEntry, FuelType, MaintenanceRecord,
    MaintenanceOutlook, MaintenanceStatus, MaintenanceType, Part, User, UserStatus, Vehicle, VehicleStatus,
    VehicleType,
};
pub use reports::{DashboardMetrics, ReportKind, Reports};
pub use store::{EntityStore, FilterState, apply_filters};
pub use stream::{EntityStream, EntityWatchStream, Snapshot};

pub use movesys_api::{
    LoginRedirect, MemorySession, NoRedirect, RedirectSignal, SessionStore, TransportConfig,
};
