// ── Store subscriptions ──
//
// A store publishes a new snapshot after every server-confirmed change to
// its cache. Views hold an `EntityStream` and re-render on each one.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{Entity, EntityId};

/// Shared, immutable view of a store's cache at one point in time.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// Handle on one domain's cached collection.
///
/// `current()` is the collection as this handle last saw it; `changed()`
/// waits for the store's next confirmed create, update, delete or reload.
pub struct EntityStream<T: Entity> {
    seen: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Entity> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let seen = receiver.borrow().clone();
        Self { seen, receiver }
    }

    pub fn current(&self) -> &Snapshot<T> {
        &self.seen
    }

    /// What the store holds right now, whether or not `changed()` has
    /// caught up.
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Look an entity up in the last seen collection.
    pub fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.seen.iter().find(|item| item.id() == Some(id)).cloned()
    }

    /// Next published collection, or `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        self.seen = self.receiver.borrow_and_update().clone();
        Some(Arc::clone(&self.seen))
    }

    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// Yields the store's collection now, then again after each change.
pub struct EntityWatchStream<T: Entity> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Entity> Stream for EntityWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
