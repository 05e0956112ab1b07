//! Transient user-visible notifications
//!
//! A single current message at a time: validation errors, success
//! confirmations and rejection warnings all go through here. A new
//! message overwrites the current one (no queueing) and every message
//! self-clears after a fixed visibility window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// How long a notification stays visible before it self-clears
pub const NOTIFICATION_VISIBLE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    /// Refused open of an already-submitted location; carries the
    /// location id so its card can flash for the same window
    Rejection(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Monotonic id; later messages supersede earlier expiry timers
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Publishes notifications over a watch channel.
///
/// Expiry is cooperative: whoever displays the message calls
/// [`Notifier::expire`] with the notification id, and the clear only
/// lands if no newer message replaced it in the meantime.
#[derive(Clone)]
pub struct Notifier {
    tx: Arc<watch::Sender<Option<Notification>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tx, &other.tx)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_VISIBLE)
    }

    /// Mostly useful in tests, where a 3 second window is too slow
    pub fn with_ttl(ttl: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Publishes a message, replacing whatever is currently shown.
    /// Returns the notification id for a later [`Notifier::expire`] call.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(Some(Notification {
            id,
            kind,
            message: message.into(),
        }));
        id
    }

    /// Waits out the visibility window, then clears the message if it is
    /// still the one identified by `id`.
    pub async fn expire(&self, id: u64) {
        tokio::time::sleep(self.ttl).await;
        if self.generation.load(Ordering::SeqCst) == id {
            let _ = self.tx.send(None);
        }
    }

    /// Clears the current message immediately
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.tx.subscribe()
    }

    /// Id of the most recently published notification (0 if none yet)
    pub fn last_id(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
