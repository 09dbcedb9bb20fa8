use cratedigger_core::{Notification, NotificationId, NotificationKind};
use cratedigger_storage::{KvWrite, keys};
use tracing::{debug, instrument};

use crate::Marketplace;
use crate::error::EngineError;

const JUST_NOW: &str = "now";

impl Marketplace {
    /// Newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.store.read_json(keys::NOTIFICATIONS)
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications().iter().filter(|n| !n.read).count()
    }

    /// Returns false when no notification has that id.
    #[instrument(skip(self))]
    pub fn mark_notification_read(&mut self, id: NotificationId) -> bool {
        let mut notifications = self.notifications();
        let Some(n) = notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        n.read = true;
        self.store.write_json(keys::NOTIFICATIONS, &notifications);
        true
    }

    #[instrument(skip(self))]
    pub fn mark_all_notifications_read(&mut self) {
        let mut notifications = self.notifications();
        if notifications.iter().all(|n| n.read) {
            return;
        }
        for n in &mut notifications {
            n.read = true;
        }
        self.store.write_json(keys::NOTIFICATIONS, &notifications);
    }

    /// Prepend an unread notification.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Notification, EngineError> {
        let notification = unread(self.tick()?, kind, title.into(), message.into());
        let write = self.prepend_write(&notification)?;
        self.store.write_batch(&[write]);
        debug!(id = %notification.id, %kind, "notification added");
        Ok(notification)
    }

    /// The `notifications` write that puts `notification` at the head.
    pub(crate) fn prepend_write(&self, notification: &Notification) -> Result<KvWrite, EngineError> {
        let mut notifications = self.notifications();
        notifications.insert(0, notification.clone());
        Ok(KvWrite::json(keys::NOTIFICATIONS, &notifications)?)
    }
}

pub(crate) fn unread(ms: u64, kind: NotificationKind, title: String, message: String) -> Notification {
    Notification {
        id: NotificationId::from_millis(ms),
        kind,
        title,
        message,
        time: JUST_NOW.to_string(),
        read: false,
    }
}
