//! Fan-out of session change notifications. The gateway publishes every
//! change (including the first resolution) and each subscriber receives them,
//! in publish order, on its own unbounded channel.

use crate::features::auth::types::Session;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// Stream of session notifications; `None` means signed out.
pub type SessionStream = UnboundedReceiver<Option<Session>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, UnboundedSender<Option<Session>>)>,
    /// Last published state; `None` until the first resolution.
    current: Option<Option<Session>>,
}

#[derive(Clone, Default)]
pub struct SessionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a listener. If the state has already resolved, the current
    /// session is queued immediately so late subscribers see the initial state.
    pub fn subscribe(&self) -> (Subscription, SessionStream) {
        let (sender, receiver) = unbounded();
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        if let Some(current) = inner.current.clone() {
            let _ = sender.unbounded_send(current);
        }
        inner.listeners.push((id, sender));

        let subscription = Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
        };
        (subscription, receiver)
    }

    /// Records the new state and delivers it to every live listener.
    pub fn publish(&self, session: Option<Session>) {
        let mut inner = self.lock();
        debug!(
            signed_in = session.is_some(),
            listeners = inner.listeners.len(),
            "session changed"
        );
        inner.current = Some(session.clone());
        inner
            .listeners
            .retain(|(_, sender)| sender.unbounded_send(session.clone()).is_ok());
    }

    /// The last published state, or `None` before the first resolution.
    pub fn current(&self) -> Option<Option<Session>> {
        self.lock().current.clone()
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// Handle returned by [`SessionHub::subscribe`]. Consuming it (or dropping it)
/// removes the listener, so it can only ever unsubscribe once.
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let mut inner = hub.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
