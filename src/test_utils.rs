use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    birthday::{BirthdayId, BirthdayRecord},
    notification::{NotificationDelivery, NotificationId, ScheduledNotification},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryCall {
    RequestPermission,
    Schedule(NotificationId),
    Cancel(NotificationId),
    CancelAll,
}

#[derive(Default)]
pub struct RecordingDelivery {
    pending: Mutex<HashMap<NotificationId, ScheduledNotification>>,
    calls: Mutex<Vec<DeliveryCall>>,
    failing: Mutex<HashSet<NotificationId>>,
    permission_denied: AtomicBool,
}

impl RecordingDelivery {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_on(&self, id: NotificationId) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn deny_permission(&self) {
        self.permission_denied.store(true, Ordering::Relaxed);
    }

    pub fn pending(&self) -> HashMap<NotificationId, ScheduledNotification> {
        self.pending.lock().unwrap().clone()
    }

    pub fn pending_ids(&self) -> BTreeSet<String> {
        self.pending
            .lock()
            .unwrap()
            .keys()
            .map(|id| id.to_string())
            .collect()
    }

    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl NotificationDelivery for RecordingDelivery {
    async fn request_permission(&self) -> anyhow::Result<bool> {
        self.calls.lock().unwrap().push(DeliveryCall::RequestPermission);
        Ok(!self.permission_denied.load(Ordering::Relaxed))
    }

    async fn schedule(&self, notification: ScheduledNotification) -> anyhow::Result<()> {
        let id = notification.id.clone();
        self.calls.lock().unwrap().push(DeliveryCall::Schedule(id.clone()));
        if self.failing.lock().unwrap().contains(&id) {
            anyhow::bail!("Delivery refused {id}");
        }

        self.pending.lock().unwrap().insert(id, notification);
        Ok(())
    }

    async fn cancel(&self, id: &NotificationId) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(DeliveryCall::Cancel(id.clone()));
        self.pending.lock().unwrap().remove(id);
        Ok(())
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(DeliveryCall::CancelAll);
        self.pending.lock().unwrap().clear();
        Ok(())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn record(id: BirthdayId, name: &str, birthday_date: NaiveDate) -> BirthdayRecord {
    BirthdayRecord {
        id,
        user_id: 1,
        name: name.to_owned(),
        birthday_date,
        location: None,
        phone: None,
        area: None,
    }
}

pub fn ids(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|id| (*id).to_owned()).collect()
}
