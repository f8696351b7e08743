//! In-process listener registry and synchronous dispatch.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ProgressError;
use crate::progress::event::ProgressNotification;
use crate::progress::listener::NotificationListener;

/// Registry of notification observers.
///
/// Add and remove are expected to be called in matched pairs, exactly once
/// each per registration. Dispatch is global: every registered listener sees
/// every notification, so listeners that only care about one call must be
/// registered for exactly the duration of that call.
pub trait ListenerRegistry: Send + Sync {
    fn add_listener(&self, listener: Arc<dyn NotificationListener>) -> Result<(), ProgressError>;

    fn remove_listener(
        &self,
        listener: &Arc<dyn NotificationListener>,
    ) -> Result<(), ProgressError>;
}

/// Process-wide notification bus.
///
/// Listeners are keyed by identity (`Arc::ptr_eq`), so registering two
/// clones of the same `Arc` is a duplicate while two separate allocations
/// of the same type are not.
#[derive(Default)]
pub struct ProgressBus {
    listeners: RwLock<Vec<Arc<dyn NotificationListener>>>,
}

impl ProgressBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Dispatch a notification synchronously to all registered listeners.
    ///
    /// Dispatch runs against a snapshot taken under the read lock and
    /// released before any listener runs, so listeners may re-enter the
    /// registry. A listener added mid-broadcast sees the next notification,
    /// not the current one. Listener panics propagate to the broadcaster.
    pub fn broadcast(&self, notification: &ProgressNotification) {
        let snapshot: Vec<Arc<dyn NotificationListener>> =
            self.listeners.read().iter().cloned().collect();
        for listener in snapshot {
            match notification {
                ProgressNotification::Started { description } => listener.started(description),
                ProgressNotification::Tick { status } => listener.progress(status.as_deref()),
                ProgressNotification::Completed => listener.completed(),
            }
        }
    }
}

impl ListenerRegistry for ProgressBus {
    fn add_listener(&self, listener: Arc<dyn NotificationListener>) -> Result<(), ProgressError> {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return Err(ProgressError::AlreadyRegistered);
        }
        listeners.push(listener);
        Ok(())
    }

    fn remove_listener(
        &self,
        listener: &Arc<dyn NotificationListener>,
    ) -> Result<(), ProgressError> {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        if listeners.len() == before {
            return Err(ProgressError::NotRegistered);
        }
        Ok(())
    }
}
