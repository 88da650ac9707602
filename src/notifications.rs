use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::QuerySenseError;
use crate::models::Notification;

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Flags are only ever set; marking an already read notification is a no-op.
    pub fn mark_read(&mut self, id: u32) -> Result<&Notification, QuerySenseError> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(QuerySenseError::UnknownNotification(id))?;
        notification.read = true;
        debug!(id, "notification marked read");
        Ok(notification)
    }

    pub fn mark_all_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.read = true;
        }
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();

    let (amount, unit) = match seconds {
        s if s < 60 => return "Just now".to_string(),
        s if s < 3600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3600, "hour"),
        s => (s / 86_400, "day"),
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::Duration;

    #[test]
    fn seeded_feed_has_four_unread() {
        let center = NotificationCenter::new(fixtures::notifications(Utc::now()));
        assert_eq!(center.unread_count(), 4);
    }

    #[test]
    fn mark_read_is_monotonic() {
        let mut center = NotificationCenter::new(fixtures::notifications(Utc::now()));
        assert!(center.mark_read(2).unwrap().read);
        assert!(center.mark_read(2).unwrap().read);
        assert!(center.mark_read(5).unwrap().read);
        assert_eq!(center.unread_count(), 3);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut center = NotificationCenter::new(fixtures::notifications(Utc::now()));
        let err = center.mark_read(42).unwrap_err();
        assert!(matches!(err, QuerySenseError::UnknownNotification(42)));
        assert_eq!(center.unread_count(), 4);
    }

    #[test]
    fn mark_all_clears_badge() {
        let mut center = NotificationCenter::new(fixtures::notifications(Utc::now()));
        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);
        assert!(center.iter().all(|n| n.read));
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now - Duration::seconds(20), now), "Just now");
        assert_eq!(format_relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative_time(now - Duration::minutes(30), now), "30 minutes ago");
        assert_eq!(format_relative_time(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_relative_time(now - Duration::hours(8), now), "8 hours ago");
        assert_eq!(format_relative_time(now - Duration::days(1), now), "1 day ago");
        assert_eq!(format_relative_time(now - Duration::days(3), now), "3 days ago");
    }
}
