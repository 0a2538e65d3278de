use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::{
    sync::RwLock,
    task::{self, JoinHandle},
};

use crate::{
    notification::{
        NotificationContent, NotificationDelivery, NotificationId, ScheduledNotification,
        Trigger,
    },
    occurrence::delay_until_daily,
};

#[async_trait]
pub trait NotificationPresenter: Send + Sync + 'static {
    async fn present(&self, id: &NotificationId, content: &NotificationContent);
}

pub struct LogPresenter;

#[async_trait]
impl NotificationPresenter for LogPresenter {
    async fn present(&self, id: &NotificationId, content: &NotificationContent) {
        log::info!("[DELIVER] {}: {} ({id})", content.title, content.body);
    }
}

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

const FIRED_RETENTION_DAYS: i64 = 2;

type PendingStore = RwLock<HashMap<NotificationId, JoinHandle<()>>>;
type FiredStore = RwLock<HashSet<(NotificationId, NaiveDateTime)>>;

pub struct LocalNotificationCenter {
    pending: PendingStore,
    // One-shots already presented, so a reconciliation pass that reschedules
    // the same id and instant does not present it again.
    fired: Arc<FiredStore>,
    presenter: Arc<dyn NotificationPresenter>,
}

impl LocalNotificationCenter {
    pub fn new(presenter: Arc<dyn NotificationPresenter>) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            fired: Arc::new(RwLock::new(HashSet::new())),
            presenter,
        }
    }

    pub async fn pending_ids(&self) -> Vec<NotificationId> {
        self.pending
            .read()
            .await
            .iter()
            .filter(|(_, task)| !task.is_finished())
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn spawn_notification_task(&self, notification: ScheduledNotification) -> JoinHandle<()> {
        let presenter = Arc::clone(&self.presenter);
        let fired = Arc::clone(&self.fired);
        task::spawn(async move {
            let ScheduledNotification {
                id,
                content,
                trigger,
                ..
            } = notification;

            match trigger {
                Trigger::At(at) => {
                    let delay = delay_until(at, now());
                    log::debug!("[SCHEDULE] Sleeping for {delay:?}. NotificationId {id}");
                    tokio::time::sleep(delay).await;
                    fired.write().await.insert((id.clone(), at));
                    presenter.present(&id, &content).await;
                }
                Trigger::Daily(fire_at) => {
                    let mut delay = delay_until_daily(fire_at, now())
                        .to_std()
                        .expect("The daily delay is always in the future.");
                    loop {
                        log::debug!("[SCHEDULE] Sleeping for {delay:?}. NotificationId {id}");
                        tokio::time::sleep(delay).await;
                        presenter.present(&id, &content).await;
                        delay = DAY;
                    }
                }
            }
        })
    }
}

#[async_trait]
impl NotificationDelivery for LocalNotificationCenter {
    async fn request_permission(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn schedule(&self, notification: ScheduledNotification) -> anyhow::Result<()> {
        let id = notification.id.clone();
        if let Trigger::At(at) = notification.trigger {
            let mut fired = self.fired.write().await;
            let horizon = now() - TimeDelta::days(FIRED_RETENTION_DAYS);
            fired.retain(|(_, fired_at)| *fired_at > horizon);
            if fired.contains(&(id.clone(), at)) {
                log::debug!("[SCHEDULE] {id} already delivered for {at}, skipping");
                return Ok(());
            }
        }

        let task = self.spawn_notification_task(notification);

        let mut pending = self.pending.write().await;
        pending.retain(|_, task| !task.is_finished());
        if let Some(previous) = pending.insert(id, task) {
            previous.abort();
        }

        Ok(())
    }

    async fn cancel(&self, id: &NotificationId) -> anyhow::Result<()> {
        if let Some(task) = self.pending.write().await.remove(id) {
            task.abort();
        }

        Ok(())
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        let mut pending = self.pending.write().await;
        let count = pending.len();
        for (_, task) in pending.drain() {
            task.abort();
        }

        log::debug!("[CANCEL] Cancelled {count} pending notifications");
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn delay_until(at: NaiveDateTime, now: NaiveDateTime) -> Duration {
    (at - now).to_std().unwrap_or(Duration::ZERO)
}
