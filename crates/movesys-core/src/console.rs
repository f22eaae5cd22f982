// ── Console facade ──
//
// Wires the five domain stores and the server reports to their
// endpoints. Each domain gets its own transport, so a base URL correction
// in one domain never leaks into another.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use movesys_api::{LoginRedirect, ResourceEndpoint, SessionStore, Transport};

use crate::assemble::{
    DeliveryAssembler, FuelEntryAssembler, MaintenanceAssembler, UserAssembler, VehicleAssembler,
};
use crate::config::ConsoleConfig;
use crate::dashboard::DashboardSummary;
use crate::error::CoreError;
use crate::model::{Delivery, Entity, FuelEntry, MaintenanceRecord, User, Vehicle};
use crate::reports::Reports;
use crate::store::EntityStore;

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    users: EntityStore<UserAssembler>,
    deliveries: EntityStore<DeliveryAssembler>,
    vehicles: EntityStore<VehicleAssembler>,
    fuel_entries: EntityStore<FuelEntryAssembler>,
    maintenance: EntityStore<MaintenanceAssembler>,
    reports: Reports,
    session: Arc<dyn SessionStore>,
}

impl Console {
    pub fn new(
        config: &ConsoleConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, CoreError> {
        let endpoint = |path: &str| -> Result<ResourceEndpoint, CoreError> {
            let transport = Transport::new(
                &config.transport,
                Arc::clone(&session),
                Arc::clone(&redirect),
            )?;
            Ok(ResourceEndpoint::new(Arc::new(transport), path))
        };

        let paths = &config.paths;
        let inner = ConsoleInner {
            users: EntityStore::new(endpoint(&paths.users)?),
            deliveries: EntityStore::new(endpoint(&paths.deliveries)?),
            vehicles: EntityStore::new(endpoint(&paths.vehicles)?),
            fuel_entries: EntityStore::new(endpoint(&paths.fuel_entries)?),
            maintenance: EntityStore::new(endpoint(&paths.maintenance)?),
            reports: Reports::new(endpoint(&paths.reports)?, endpoint(&paths.dashboard)?),
            session: Arc::clone(&session),
        };
        info!(base_url = %config.transport.base_url, "console ready");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn users(&self) -> &EntityStore<UserAssembler> {
        &self.inner.users
    }

    pub fn deliveries(&self) -> &EntityStore<DeliveryAssembler> {
        &self.inner.deliveries
    }

    pub fn vehicles(&self) -> &EntityStore<VehicleAssembler> {
        &self.inner.vehicles
    }

    pub fn fuel_entries(&self) -> &EntityStore<FuelEntryAssembler> {
        &self.inner.fuel_entries
    }

    pub fn maintenance(&self) -> &EntityStore<MaintenanceAssembler> {
        &self.inner.maintenance
    }

    /// Server-computed reports and dashboard metrics.
    pub fn reports(&self) -> &Reports {
        &self.inner.reports
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// Load every domain concurrently.
    ///
    /// Waits for all five fetches. Domains that loaded keep their fresh
    /// caches even when others fail; the failures are reported together.
    pub async fn fetch_all_data(&self) -> Result<(), CoreError> {
        let (users, deliveries, vehicles, fuel, maintenance) = tokio::join!(
            self.inner.users.fetch_all(&[]),
            self.inner.deliveries.fetch_all(&[]),
            self.inner.vehicles.fetch_all(&[]),
            self.inner.fuel_entries.fetch_all(&[]),
            self.inner.maintenance.fetch_all(&[]),
        );

        let failures: Vec<String> = [
            (users.is_err(), User::PLURAL),
            (deliveries.is_err(), Delivery::PLURAL),
            (vehicles.is_err(), Vehicle::PLURAL),
            (fuel.is_err(), FuelEntry::PLURAL),
            (maintenance.is_err(), MaintenanceRecord::PLURAL),
        ]
        .into_iter()
        .filter_map(|(failed, domain)| failed.then(|| domain.to_owned()))
        .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            warn!(?failures, "dashboard data partially loaded");
            Err(CoreError::PartialFetch { failures })
        }
    }

    /// Aggregate the current caches.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSummary {
        DashboardSummary::from_console(self, now)
    }
}
