//! Fire-time side of a reminder: payload → notification.

use super::ReminderPayload;
use crate::errors::AppResult;
use crate::models::{CareKind, Locale};
use once_cell::sync::OnceCell;

pub const CHANNEL_ID: &str = "care_event_reminder_channel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    Drizzle,
    PartlyCloudy,
    Rain,
    Snow,
    AppIcon,
}

impl NotificationIcon {
    pub fn for_kind(kind: CareKind) -> Self {
        match kind {
            CareKind::Watering => NotificationIcon::Drizzle,
            CareKind::Fertilizing => NotificationIcon::PartlyCloudy,
            CareKind::Spraying => NotificationIcon::Rain,
            CareKind::Repotting => NotificationIcon::Snow,
        }
    }
}

/// Care reminders use a single, high-importance channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
}

impl NotificationChannel {
    pub fn care_reminders(locale: Locale) -> Self {
        let name = match locale {
            Locale::En => "Care event reminders",
            Locale::Ru => "Напоминания о событиях ухода",
        };
        Self {
            id: CHANNEL_ID.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Event id: a second notification with the same id replaces the first.
    pub id: i64,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub icon: NotificationIcon,
    pub auto_cancel: bool,
}

/// Delivery side of notifications (desktop, terminal, test recorder...).
pub trait Notifier {
    /// Register `channel`; calling it again for the same channel is harmless.
    fn ensure_channel(&self, channel: &NotificationChannel) -> AppResult<()>;

    /// Whether this process may show notifications right now.
    fn has_permission(&self) -> bool;

    fn notify(&self, notification: &Notification) -> AppResult<()>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn ensure_channel(&self, channel: &NotificationChannel) -> AppResult<()> {
        (**self).ensure_channel(channel)
    }

    fn has_permission(&self) -> bool {
        (**self).has_permission()
    }

    fn notify(&self, notification: &Notification) -> AppResult<()> {
        (**self).notify(notification)
    }
}

/// Outcome reported back to the scheduling side. Reminders are
/// fire-and-forget, so there is nothing else to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkResult {
    Success,
}

/// Label with its emoji plus the icon, resolved from the localized label
/// carried in the payload. Unknown labels pass through unchanged.
pub fn decorate_label(label: &str) -> (String, NotificationIcon) {
    match CareKind::from_label(label) {
        Some(kind) => (
            format!("{} {}", label, kind.emoji()),
            NotificationIcon::for_kind(kind),
        ),
        None => (label.to_string(), NotificationIcon::AppIcon),
    }
}

/// Build the notification for `payload` without showing it.
pub fn compose(payload: &ReminderPayload, locale: Locale) -> Notification {
    let (task, icon) = decorate_label(&payload.event_type);
    let plant = payload.plant_name.trim();

    let (title, body) = match locale {
        Locale::En => (
            "Care event reminder",
            if plant.is_empty() {
                format!("Time to do: {task}")
            } else {
                format!("Time to do: {task} for plant {plant}")
            },
        ),
        Locale::Ru => (
            "Напоминание о событии ухода",
            if plant.is_empty() {
                format!("Пора выполнить: {task}")
            } else {
                format!("Пора выполнить: {task} для растения {plant}")
            },
        ),
    };

    Notification {
        id: payload.event_id,
        channel_id: CHANNEL_ID.to_string(),
        title: title.to_string(),
        body,
        icon,
        auto_cancel: true,
    }
}

pub struct ReminderWorker<N: Notifier> {
    notifier: N,
    locale: Locale,
    channel: OnceCell<()>,
}

impl<N: Notifier> ReminderWorker<N> {
    pub fn new(notifier: N, locale: Locale) -> Self {
        Self {
            notifier,
            locale,
            channel: OnceCell::new(),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn ensure_channel(&self) -> AppResult<()> {
        self.channel
            .get_or_try_init(|| {
                self.notifier
                    .ensure_channel(&NotificationChannel::care_reminders(self.locale))
            })
            .map(|_| ())
    }

    /// Show the reminder for `payload`. Never fails and never asks for a
    /// retry: missing permission or a delivery error only gets logged.
    pub fn fire(&self, payload: &ReminderPayload) -> WorkResult {
        tracing::debug!(event_id = payload.event_id, plant_id = payload.plant_id, "reminder fired");

        if let Err(e) = self.ensure_channel() {
            tracing::warn!(%e, "could not register notification channel");
        }

        let notification = compose(payload, self.locale);

        if !self.notifier.has_permission() {
            tracing::info!(event_id = payload.event_id, "notification permission missing, reminder dropped");
            return WorkResult::Success;
        }

        if let Err(e) = self.notifier.notify(&notification) {
            tracing::warn!(%e, event_id = payload.event_id, "failed to show reminder");
        }

        WorkResult::Success
    }
}
