// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration entries and caller-owned subscription handles

use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};
use uuid::Uuid;

/// Callback invoked with the payload of each matching event
pub(crate) type Callback = Box<dyn Fn(&Value) + Send + Sync>;

/// The bus's registration list, in subscription order
pub(crate) type Registry = RwLock<Vec<Arc<Subscriber>>>;

/// Identifier assigned to each registration
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registered name/callback pair, held by the bus
pub(crate) struct Subscriber {
    pub(crate) id: SubscriberId,
    pub(crate) event_name: String,
    pub(crate) callback: Callback,
    active: AtomicBool,
}

impl Subscriber {
    pub(crate) fn new(event_name: String, callback: Callback) -> Self {
        Self {
            id: SubscriberId::new(),
            event_name,
            callback,
            active: AtomicBool::new(true),
        }
    }

    /// Check if this registration matches an event name (exact equality)
    pub(crate) fn matches(&self, event_name: &str) -> bool {
        self.event_name == event_name
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Flip active to false; returns true only for the call that did the flip
    pub(crate) fn deactivate(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }
}

/// Caller-owned handle for one registration
///
/// The handle is the sole way to cancel the registration. Dropping it does
/// *not* unsubscribe: a registration stays live, and keeps its callback's
/// captured state alive, until `unsubscribe` is called.
pub struct Subscription {
    subscriber: Arc<Subscriber>,
    registry: Weak<Registry>,
}

impl Subscription {
    pub(crate) fn new(subscriber: Arc<Subscriber>, registry: Weak<Registry>) -> Self {
        Self {
            subscriber,
            registry,
        }
    }

    pub fn id(&self) -> &SubscriberId {
        &self.subscriber.id
    }

    pub fn event_name(&self) -> &str {
        &self.subscriber.event_name
    }

    pub fn is_active(&self) -> bool {
        self.subscriber.is_active()
    }

    /// Cancel this registration
    ///
    /// Idempotent: second and later calls are no-ops. After this returns, no
    /// publish that begins afterwards will invoke the callback; a dispatch
    /// pass already underway on another thread is cancelled best-effort. The
    /// entry is removed from the bus so captured state is released.
    pub fn unsubscribe(&self) {
        if !self.subscriber.deactivate() {
            return;
        }

        if let Some(registry) = self.registry.upgrade() {
            let mut subs = registry.write().unwrap_or_else(|e| e.into_inner());
            subs.retain(|s| !Arc::ptr_eq(s, &self.subscriber));
        }

        tracing::debug!(
            id = %self.subscriber.id,
            event = %self.subscriber.event_name,
            "unsubscribed"
        );
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.subscriber.id)
            .field("event_name", &self.subscriber.event_name)
            .field("active", &self.subscriber.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
