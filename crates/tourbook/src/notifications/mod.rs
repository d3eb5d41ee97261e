//! Admin console notifications: listing and mark-as-read.

pub mod router;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SiteError;
use crate::store::{SourceError, SourceOutcome};

pub use router::notification_router;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Form posted by the admin console's "mark as read" action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkReadForm {
    #[serde(rename = "notificationId", default)]
    pub notification_id: Option<String>,
}

/// Storage abstraction for notifications.
pub trait NotificationStore: Send + Sync {
    fn list(&self) -> SourceOutcome<Vec<Notification>>;
    /// Flag the notification as read, returning it, or `None` when the id is unknown.
    fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, SourceError>;
}

pub struct NotificationService<S> {
    store: Arc<S>,
}

impl<S> NotificationService<S>
where
    S: NotificationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All notifications, newest first. A store without a notifications table has none.
    pub fn list(&self) -> Result<Vec<Notification>, SiteError> {
        let mut notifications = self.store.list().or_empty(Vec::new())?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub fn mark_read(&self, form: MarkReadForm) -> Result<Notification, SiteError> {
        let id = form
            .notification_id
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(NotificationId)
            .ok_or_else(|| SiteError::Validation("notification id is required".to_string()))?;

        match self.store.mark_read(&id)? {
            Some(notification) => {
                info!(notification = %id.0, "notification marked as read");
                Ok(notification)
            }
            None => Err(SiteError::not_found("notification", id.0)),
        }
    }
}
