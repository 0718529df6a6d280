use super::worker::{Notification, NotificationChannel, Notifier};
use crate::errors::AppResult;
use crate::ui::messages::reminder;

/// Shows reminders on the terminal running `plantcare remind run`.
/// "Permission" is the `notifications_enabled` configuration flag.
pub struct ConsoleNotifier {
    permitted: bool,
}

impl ConsoleNotifier {
    pub fn new(permitted: bool) -> Self {
        Self { permitted }
    }
}

impl Notifier for ConsoleNotifier {
    fn ensure_channel(&self, channel: &NotificationChannel) -> AppResult<()> {
        tracing::debug!(channel = %channel.id, name = %channel.name, "notification channel ready");
        Ok(())
    }

    fn has_permission(&self) -> bool {
        self.permitted
    }

    fn notify(&self, notification: &Notification) -> AppResult<()> {
        reminder(&notification.title, &notification.body);
        Ok(())
    }
}
