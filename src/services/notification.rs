//! Notification service implementation
//!
//! User-facing status messages are queued in insertion order and expire on
//! their own timers. Every call produces a new entry; nothing is merged.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::settings::Settings;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Queue {
    entries: Vec<Notification>,
    timers: HashMap<NotificationId, JoinHandle<()>>,
}

#[derive(Debug)]
struct Inner {
    queue: Mutex<Queue>,
    updates: watch::Sender<Vec<Notification>>,
    next_id: AtomicU64,
    display_duration: Duration,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        // A panicked holder cannot leave the queue half-updated
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn remove(&self, id: NotificationId) -> bool {
        let mut queue = self.lock();
        let before = queue.entries.len();
        queue.entries.retain(|entry| entry.id != id);
        if let Some(timer) = queue.timers.remove(&id) {
            timer.abort();
        }
        let removed = queue.entries.len() != before;
        if removed {
            self.updates.send_replace(queue.entries.clone());
        }
        removed
    }

    fn expire(&self, id: NotificationId) {
        let mut queue = self.lock();
        // The timer is finishing; dropping its handle must not abort it
        queue.timers.remove(&id);
        let before = queue.entries.len();
        queue.entries.retain(|entry| entry.id != id);
        if queue.entries.len() != before {
            debug!(notification_id = %id, "Notification expired");
            self.updates.send_replace(queue.entries.clone());
        }
    }
}

/// Queue of auto-expiring user-facing messages
#[derive(Debug, Clone)]
pub struct NotificationService {
    inner: Arc<Inner>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(display_duration: Duration) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(Queue::default()),
                updates,
                next_id: AtomicU64::new(1),
                display_duration,
            }),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.notification_duration())
    }

    pub fn display_duration(&self) -> Duration {
        self.inner.display_duration
    }

    /// Enqueue a message and start its expiry timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };

        info!(notification_id = %id, kind = %kind, message = %notification.message, "Notification shown");

        let mut queue = self.inner.lock();
        queue.entries.push(notification);
        queue.timers.insert(id, self.spawn_timer(id));
        self.inner.updates.send_replace(queue.entries.clone());
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Warning, message)
    }

    /// Remove one entry before it expires. Returns false if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let removed = self.inner.remove(id);
        if removed {
            debug!(notification_id = %id, "Notification dismissed");
        }
        removed
    }

    /// Current entries, oldest first
    pub fn visible(&self) -> Vec<Notification> {
        self.inner.lock().entries.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.updates.subscribe()
    }

    fn spawn_timer(&self, id: NotificationId) -> JoinHandle<()> {
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let duration = self.inner.display_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = inner.upgrade() {
                inner.expire(id);
            }
        })
    }
}
