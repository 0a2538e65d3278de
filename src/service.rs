use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDate;

use crate::{
    birthday::{BirthdayId, BirthdayRecord, NewBirthday, UpdateBirthday},
    occurrence::days_until_next_occurrence,
    scheduling::{BirthdayNotificationScheduler, ReconcileSummary},
    storage::{BirthdayStorage, StorageError},
    urgency::{DisplayUrgency, days_label, display_urgency},
    user::UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Today,
    Tomorrow,
    Week,
}

impl ListFilter {
    pub fn matches(&self, days_until: i64) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Today => days_until == 0,
            ListFilter::Tomorrow => days_until == 1,
            ListFilter::Week => (0..=7).contains(&days_until),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub record: BirthdayRecord,
    pub days_until: i64,
    pub urgency: DisplayUrgency,
    pub label: String,
}

impl UpcomingBirthday {
    fn new(record: BirthdayRecord, today: NaiveDate) -> Self {
        let days_until = days_until_next_occurrence(record.month_day(), today);
        Self {
            record,
            days_until,
            urgency: display_urgency(days_until),
            label: days_label(days_until),
        }
    }
}

pub struct BirthdayService {
    storage: Arc<dyn BirthdayStorage>,
    scheduler: BirthdayNotificationScheduler,
    notifications_enabled: AtomicBool,
    // Cleared while a runner owns reconciliation through the change feed.
    reconciles_mutations: AtomicBool,
}

impl BirthdayService {
    pub fn new(storage: Arc<dyn BirthdayStorage>, scheduler: BirthdayNotificationScheduler) -> Self {
        Self {
            storage,
            scheduler,
            notifications_enabled: AtomicBool::new(false),
            reconciles_mutations: AtomicBool::new(true),
        }
    }

    pub fn storage(&self) -> &Arc<dyn BirthdayStorage> {
        &self.storage
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled.load(Ordering::Relaxed)
    }

    pub fn reconciles_mutations(&self) -> bool {
        self.reconciles_mutations.load(Ordering::Relaxed)
    }

    pub(crate) fn set_reconciles_mutations(&self, enabled: bool) {
        self.reconciles_mutations.store(enabled, Ordering::Relaxed);
    }

    pub async fn enable_notifications(&self) -> bool {
        let granted = self.scheduler.request_permission().await;
        if !granted {
            log::warn!("Notification permission denied, birthdays will not be notified");
        }

        self.notifications_enabled.store(granted, Ordering::Relaxed);
        granted
    }

    pub async fn add_birthday(
        &self,
        user_id: UserId,
        birthday: NewBirthday,
        today: NaiveDate,
    ) -> Result<BirthdayRecord, StorageError> {
        let record = self.storage.insert(user_id, birthday).await?;

        if self.reconciles_mutations() && self.notifications_enabled() {
            self.scheduler.reconcile_one(&record, today).await;
        }

        Ok(record)
    }

    pub async fn update_birthday(
        &self,
        id: BirthdayId,
        update: UpdateBirthday,
        today: NaiveDate,
    ) -> Result<BirthdayRecord, StorageError> {
        let record = self.storage.update(id, update).await?;

        if !self.reconciles_mutations() {
            return Ok(record);
        }

        // A new date can move the record to another bucket.
        self.scheduler.cancel_for_record(record.id).await;
        if self.notifications_enabled() {
            self.scheduler.reconcile_one(&record, today).await;
        }

        Ok(record)
    }

    pub async fn delete_birthday(&self, id: BirthdayId) -> Result<(), StorageError> {
        self.storage.delete(id).await?;
        if self.reconciles_mutations() {
            self.scheduler.cancel_for_record(id).await;
        }

        Ok(())
    }

    pub async fn refresh(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<ReconcileSummary, StorageError> {
        let records = self.storage.list(user_id).await?;

        if !self.notifications_enabled() {
            log::warn!("[RECONCILE] Skipped, notifications are not enabled");
            return Ok(ReconcileSummary::default());
        }

        Ok(self.scheduler.reconcile_all(&records, today).await)
    }

    pub async fn upcoming(
        &self,
        user_id: UserId,
        today: NaiveDate,
        filter: ListFilter,
        query: Option<&str>,
    ) -> Result<Vec<UpcomingBirthday>, StorageError> {
        let query = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let mut upcoming: Vec<_> = self
            .storage
            .list(user_id)
            .await?
            .into_iter()
            .filter(|record| match &query {
                Some(q) => record.name.to_lowercase().contains(q),
                None => true,
            })
            .map(|record| UpcomingBirthday::new(record, today))
            .filter(|b| filter.matches(b.days_until))
            .collect();

        upcoming.sort_by_key(|b| (b.days_until, b.record.id));
        Ok(upcoming)
    }
}
