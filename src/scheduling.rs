use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    appsettings::NotificationSettings,
    birthday::{BirthdayId, BirthdayRecord},
    notification::{
        NotificationContent, NotificationDelivery, NotificationId, ScheduledNotification,
        Trigger, birthday_message,
    },
    occurrence::days_until_next_occurrence,
    urgency::classify,
};

const NOTIFICATION_WINDOW_DAYS: i64 = 10;

pub fn plan_for_record(
    record: &BirthdayRecord,
    today: NaiveDate,
    settings: &NotificationSettings,
) -> Option<ScheduledNotification> {
    let days = days_until_next_occurrence(record.month_day(), today);
    if !(0..=NOTIFICATION_WINDOW_DAYS).contains(&days) {
        return None;
    }

    let bucket = classify(days);
    let body = birthday_message(bucket, &record.name)?;

    Some(ScheduledNotification {
        id: NotificationId::for_birthday(record.id, bucket),
        birthday_id: record.id,
        content: NotificationContent {
            title: settings.title.clone(),
            body,
        },
        trigger: Trigger::At(today.and_time(settings.delivery_time)),
    })
}

pub fn plan_all(
    records: &[BirthdayRecord],
    today: NaiveDate,
    settings: &NotificationSettings,
) -> Vec<ScheduledNotification> {
    records
        .iter()
        .filter_map(|record| plan_for_record(record, today, settings))
        .collect()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub scheduled: usize,
    pub failed: usize,
}

// Passes over the same records must not run concurrently.
pub struct BirthdayNotificationScheduler {
    delivery: Arc<dyn NotificationDelivery>,
    settings: NotificationSettings,
}

impl BirthdayNotificationScheduler {
    pub fn new(delivery: Arc<dyn NotificationDelivery>, settings: NotificationSettings) -> Self {
        Self { delivery, settings }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub async fn request_permission(&self) -> bool {
        match self.delivery.request_permission().await {
            Ok(granted) => granted,
            Err(e) => {
                log::warn!("Notification permission request failed: {e:#}");
                false
            }
        }
    }

    pub async fn reconcile_all(
        &self,
        records: &[BirthdayRecord],
        today: NaiveDate,
    ) -> ReconcileSummary {
        log::info!(
            "[RECONCILE] Reconciling notifications for {} birthdays on {}",
            records.len(),
            today
        );

        // The wipe has to finish before anything new is scheduled.
        if let Err(e) = self.delivery.cancel_all().await {
            log::error!("[RECONCILE] Failed to cancel pending notifications: {e:#}");
        }

        let mut summary = ReconcileSummary::default();
        for notification in plan_all(records, today, &self.settings) {
            self.schedule(notification, &mut summary).await;
        }

        log::info!(
            "[RECONCILE] Done. [scheduled = {}, failed = {}]",
            summary.scheduled,
            summary.failed
        );

        summary
    }

    pub async fn reconcile_one(&self, record: &BirthdayRecord, today: NaiveDate) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        match plan_for_record(record, today, &self.settings) {
            Some(notification) => self.schedule(notification, &mut summary).await,
            None => log::debug!(
                "[SCHEDULE] No notification due for birthday {} on {}",
                record.id,
                today
            ),
        }

        summary
    }

    pub async fn cancel_for_record(&self, birthday_id: BirthdayId) {
        for id in NotificationId::all_for_birthday(birthday_id) {
            if let Err(e) = self.delivery.cancel(&id).await {
                log::warn!("[CANCEL] Failed to cancel {id}: {e:#}");
            }
        }

        log::info!("[CANCEL] Cancelled notifications for birthday {birthday_id}");
    }

    async fn schedule(&self, notification: ScheduledNotification, summary: &mut ReconcileSummary) {
        let id = notification.id.clone();
        match self.delivery.schedule(notification).await {
            Ok(()) => {
                log::info!("[SCHEDULE] Scheduled {id}");
                summary.scheduled += 1;
            }
            Err(e) => {
                log::error!("[SCHEDULE] Failed to schedule {id}: {e:#}");
                summary.failed += 1;
            }
        }
    }
}
