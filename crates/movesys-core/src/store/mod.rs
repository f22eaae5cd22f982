// ── Entity stores ──
//
// One store per domain owns the client-side cache of that domain's
// collection. The cache only changes after the server confirms an
// operation; failures record a message and leave the cache untouched.
//
// Concurrent operations on one store are not serialized. Two updates
// fired together settle in completion order, and the cache reflects
// whichever response landed last.

mod filter;
mod user;
mod vehicle;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error};

use movesys_api::{ApiResponse, Params, ResourceEndpoint};

use crate::assemble::Assembler;
use crate::error::{CoreError, user_message};
use crate::model::{Entity, EntityId};
use crate::stream::{EntityStream, Snapshot};

pub use filter::{ALL, FilterState, apply_filters};

/// Reactive cache plus CRUD operations for one domain.
pub struct EntityStore<A: Assembler> {
    endpoint: ResourceEndpoint,
    cache: watch::Sender<Snapshot<A::Entity>>,
    in_flight: watch::Sender<usize>,
    errors: watch::Sender<Vec<String>>,
    filters: watch::Sender<FilterState>,
    _assembler: PhantomData<fn() -> A>,
}

/// Decrements the in-flight counter when an operation settles, however it
/// settles.
struct LoadingGuard<'a>(&'a watch::Sender<usize>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl<A: Assembler> EntityStore<A> {
    pub fn new(endpoint: ResourceEndpoint) -> Self {
        let (cache, _) = watch::channel(Arc::new(Vec::new()));
        let (in_flight, _) = watch::channel(0);
        let (errors, _) = watch::channel(Vec::new());
        let (filters, _) = watch::channel(FilterState::default());
        Self {
            endpoint,
            cache,
            in_flight,
            errors,
            filters,
            _assembler: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &ResourceEndpoint {
        &self.endpoint
    }

    // ── Network operations ───────────────────────────────────────────

    /// Replace the cache with the collection. Clears previously recorded
    /// errors first.
    pub async fn fetch_all(&self, params: &Params) -> Result<Snapshot<A::Entity>, CoreError> {
        let _loading = self.begin();
        self.errors.send_modify(Vec::clear);

        match self.endpoint.list(params).await {
            Ok(response) => {
                let entities = A::to_entities(&response);
                debug!(kind = Self::plural(), count = entities.len(), "collection loaded");
                self.replace_all(entities);
                Ok(self.snapshot())
            }
            Err(err) => Err(self.fail(err.into(), &format!("Failed to load {}", Self::plural()))),
        }
    }

    /// Load one entity and upsert it into the cache.
    pub async fn fetch_one(&self, id: &EntityId) -> Result<Arc<A::Entity>, CoreError> {
        let _loading = self.begin();
        let fallback = format!("Failed to load {}", Self::kind());

        let result = async {
            let response = self.endpoint.get_by_id(&id.to_string()).await?;
            Self::single(&response)
        }
        .await;

        match result {
            Ok(entity) => {
                let entity = Arc::new(entity);
                self.mutate(|items| upsert(items, id, Arc::clone(&entity)));
                Ok(entity)
            }
            Err(err) => Err(self.fail(err, &fallback)),
        }
    }

    /// Create on the server and append what the server returned.
    pub async fn create(&self, entity: &A::Entity) -> Result<Arc<A::Entity>, CoreError> {
        let _loading = self.begin();
        let fallback = format!("Failed to create {}", Self::kind());

        let result = async {
            let response = self.endpoint.create(&A::to_create_resource(entity)).await?;
            Self::single(&response)
        }
        .await;

        match result {
            Ok(created) => {
                let created = Arc::new(created);
                match created.id().cloned() {
                    Some(id) => self.mutate(|items| upsert(items, &id, Arc::clone(&created))),
                    None => self.mutate(|items| items.push(Arc::clone(&created))),
                }
                Ok(created)
            }
            Err(err) => Err(self.fail(err, &fallback)),
        }
    }

    /// Full update. A no-content acknowledgement triggers one follow-up GET
    /// so the cache holds the server's post-update state.
    pub async fn update(&self, entity: &A::Entity) -> Result<Arc<A::Entity>, CoreError> {
        let _loading = self.begin();
        let fallback = format!("Failed to update {}", Self::kind());

        let Some(id) = entity.id().cloned() else {
            return Err(self.fail(CoreError::MissingId { kind: Self::kind() }, &fallback));
        };

        let result = async {
            let response = self
                .endpoint
                .update(&id.to_string(), &A::to_update_resource(entity))
                .await?;
            self.settle(&id, response).await
        }
        .await;

        self.apply_mutation(&id, result, &fallback)
    }

    /// Partial update (status changes and the like), same no-content rule
    /// as [`update`](Self::update).
    pub async fn patch(&self, id: &EntityId, partial: &Value) -> Result<Arc<A::Entity>, CoreError> {
        let _loading = self.begin();
        let fallback = format!("Failed to update {}", Self::kind());

        let result = async {
            let response = self.endpoint.patch(&id.to_string(), partial).await?;
            self.settle(id, response).await
        }
        .await;

        self.apply_mutation(id, result, &fallback)
    }

    /// Delete on the server, then drop the cache entry. A 404 means the
    /// entity is already gone and counts as success.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let _loading = self.begin();

        match self.endpoint.delete(&id.to_string()).await {
            Ok(_) => {}
            Err(err) if err.is_not_found() => {
                debug!(kind = Self::kind(), %id, "already deleted on the server");
            }
            Err(err) => {
                return Err(self.fail(err.into(), &format!("Failed to delete {}", Self::kind())));
            }
        }

        self.mutate(|items| items.retain(|item| item.id() != Some(id)));
        Ok(())
    }

    /// Server-side search replacing the cache. A blank query reloads the
    /// full collection instead. Local filter state is not touched.
    pub async fn search(&self, query: &str) -> Result<Snapshot<A::Entity>, CoreError> {
        if query.trim().is_empty() {
            return self.fetch_all(&[]).await;
        }

        let _loading = self.begin();
        match self.endpoint.search(query, &[]).await {
            Ok(response) => {
                self.replace_all(A::to_entities(&response));
                Ok(self.snapshot())
            }
            Err(err) => Err(self.fail(err.into(), &format!("Failed to search {}", Self::plural()))),
        }
    }

    // ── Cache reads ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot<A::Entity> {
        self.cache.borrow().clone()
    }

    pub fn get(&self, id: &EntityId) -> Option<Arc<A::Entity>> {
        self.cache
            .borrow()
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn subscribe(&self) -> EntityStream<A::Entity> {
        EntityStream::new(self.cache.subscribe())
    }

    /// `true` while at least one operation is outstanding.
    pub fn is_loading(&self) -> bool {
        *self.in_flight.borrow() > 0
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn clear_errors(&self) {
        self.errors.send_modify(Vec::clear);
    }

    // ── Filters ──────────────────────────────────────────────────────

    /// The cache narrowed by the current filter state, computed now.
    pub fn filtered(&self) -> Vec<Arc<A::Entity>> {
        apply_filters(&self.snapshot(), &self.filters.borrow())
    }

    pub fn filters(&self) -> FilterState {
        self.filters.borrow().clone()
    }

    pub fn set_search_query(&self, query: &str) {
        self.filters.send_modify(|f| query.clone_into(&mut f.query));
    }

    /// Select a value for one of the entity's facets (`"all"` clears it).
    pub fn set_facet(&self, facet: &str, value: &str) -> Result<(), CoreError> {
        let facets = <A::Entity as Entity>::FACETS;
        if !facets.iter().any(|known| *known == facet) {
            return Err(CoreError::UnknownFacet {
                kind: Self::kind(),
                facet: facet.to_owned(),
                expected: facets.join(", "),
            });
        }
        self.filters.send_modify(|f| f.select(facet, value));
        Ok(())
    }

    pub fn clear_filters(&self) {
        self.filters.send_replace(FilterState::default());
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn kind() -> &'static str {
        <A::Entity as Entity>::KIND
    }

    fn plural() -> &'static str {
        <A::Entity as Entity>::PLURAL
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.send_modify(|n| *n += 1);
        LoadingGuard(&self.in_flight)
    }

    /// Record a failure message and hand the error back.
    fn fail(&self, err: CoreError, fallback: &str) -> CoreError {
        let message = user_message(&err, fallback);
        error!(kind = Self::kind(), error = %err, "{message}");
        self.errors.send_modify(|errors| errors.push(message));
        err
    }

    fn single(response: &ApiResponse) -> Result<A::Entity, CoreError> {
        response
            .body
            .as_ref()
            .filter(|body| !body.is_null())
            .map(A::to_entity)
            .ok_or(CoreError::EmptyResponse { kind: Self::kind() })
    }

    /// Resolve a mutation response to the authoritative entity.
    async fn settle(&self, id: &EntityId, response: ApiResponse) -> Result<A::Entity, CoreError> {
        if response.is_no_content() {
            debug!(kind = Self::kind(), %id, "mutation acknowledged without body, re-fetching");
            let response = self.endpoint.get_by_id(&id.to_string()).await?;
            return Self::single(&response);
        }
        Self::single(&response)
    }

    fn apply_mutation(
        &self,
        id: &EntityId,
        result: Result<A::Entity, CoreError>,
        fallback: &str,
    ) -> Result<Arc<A::Entity>, CoreError> {
        match result {
            Ok(entity) => {
                let entity = Arc::new(entity);
                self.mutate(|items| {
                    if let Some(slot) = items.iter_mut().find(|item| item.id() == Some(id)) {
                        *slot = Arc::clone(&entity);
                    }
                });
                Ok(entity)
            }
            Err(err) => Err(self.fail(err, fallback)),
        }
    }

    fn replace_all(&self, entities: Vec<A::Entity>) {
        let mut items: Vec<Arc<A::Entity>> = Vec::with_capacity(entities.len());
        let mut index: HashMap<EntityId, usize> = HashMap::new();
        for entity in entities {
            match entity.id().cloned() {
                Some(id) => {
                    if let Some(&at) = index.get(&id) {
                        items[at] = Arc::new(entity);
                    } else {
                        index.insert(id, items.len());
                        items.push(Arc::new(entity));
                    }
                }
                None => items.push(Arc::new(entity)),
            }
        }
        self.cache.send_replace(Arc::new(items));
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<Arc<A::Entity>>)) {
        self.cache.send_modify(|snapshot| {
            let mut items = snapshot.as_ref().clone();
            f(&mut items);
            *snapshot = Arc::new(items);
        });
    }
}

/// Replace the entry with `id` in place, or append.
fn upsert<T: Entity>(items: &mut Vec<Arc<T>>, id: &EntityId, entity: Arc<T>) {
    match items.iter_mut().find(|item| item.id() == Some(id)) {
        Some(slot) => *slot = entity,
        None => items.push(entity),
    }
}

impl<A: Assembler> std::fmt::Debug for EntityStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("kind", &Self::kind())
            .field("path", &self.endpoint.path())
            .field("len", &self.len())
            .field("in_flight", &*self.in_flight.borrow())
            .finish_non_exhaustive()
    }
}
