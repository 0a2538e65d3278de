use std::fmt;

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};

use crate::{birthday::BirthdayId, urgency::UrgencyBucket};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(inner: impl Into<String>) -> Self {
        Self(inner.into())
    }

    pub fn for_birthday(birthday_id: BirthdayId, bucket: UrgencyBucket) -> Self {
        Self(format!("birthday_{birthday_id}_{bucket}"))
    }

    pub fn all_for_birthday(birthday_id: BirthdayId) -> Vec<Self> {
        UrgencyBucket::NOTIFYING
            .iter()
            .map(|bucket| Self::for_birthday(birthday_id, *bucket))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    // Fires right away when already in the past.
    At(NaiveDateTime),
    Daily(NaiveTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNotification {
    pub id: NotificationId,
    pub birthday_id: BirthdayId,
    pub content: NotificationContent,
    pub trigger: Trigger,
}

pub fn birthday_message(bucket: UrgencyBucket, name: &str) -> Option<String> {
    match bucket {
        UrgencyBucket::Today => Some(format!("¡Hoy es el cumpleaños de {name}! 🎉")),
        UrgencyBucket::Tomorrow => Some(format!("¡Mañana es el cumpleaños de {name}!")),
        UrgencyBucket::FiveDays => Some(format!("¡Faltan 5 días para el cumpleaños de {name}!")),
        UrgencyBucket::TenDays => Some(format!("¡Faltan 10 días para el cumpleaños de {name}!")),
        UrgencyBucket::None => None,
    }
}

#[async_trait]
pub trait NotificationDelivery: Send + Sync + 'static {
    async fn request_permission(&self) -> anyhow::Result<bool>;

    async fn schedule(&self, notification: ScheduledNotification) -> anyhow::Result<()>;

    async fn cancel(&self, id: &NotificationId) -> anyhow::Result<()>;

    async fn cancel_all(&self) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests;
