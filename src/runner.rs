use std::sync::Arc;

use chrono::{Local, NaiveTime};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::{self, JoinHandle},
};
use tokio_util::sync::CancellationToken;

use crate::{
    occurrence::{delay_until_daily, local_today},
    service::BirthdayService,
    storage::BirthdayChange,
    user::UserId,
};

// While running, this is the only loop that reconciles the user's
// notifications; the service stops reconciling its own mutations.
pub struct ReconciliationRunner {
    service: Arc<BirthdayService>,
    user_id: UserId,
    delivery_time: NaiveTime,
}

impl ReconciliationRunner {
    pub fn new(service: Arc<BirthdayService>, user_id: UserId, delivery_time: NaiveTime) -> Self {
        Self {
            service,
            user_id,
            delivery_time,
        }
    }

    pub fn spawn(self, cancellation_token: CancellationToken) -> JoinHandle<()> {
        let changes = self.service.storage().subscribe();
        self.service.set_reconciles_mutations(false);
        task::spawn(async move { self.run(changes, cancellation_token).await })
    }

    async fn run(
        self,
        mut changes: broadcast::Receiver<BirthdayChange>,
        cancellation_token: CancellationToken,
    ) {
        log::info!("Starting reconciliation runner for user {}", self.user_id);
        self.reconcile().await;

        loop {
            let delay = delay_until_daily(self.delivery_time, Local::now().naive_local())
                .to_std()
                .expect("The daily delay is always in the future.");

            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Reconciliation runner shutting down");
                    break;
                }
                _ = tokio::time::sleep(delay) => {
                    self.reconcile().await;
                }
                change = changes.recv() => match change {
                    Ok(change) if change.user_id == self.user_id => {
                        log::debug!("[RECONCILE] Birthday {} {:?}", change.birthday_id, change.kind);
                        self.reconcile().await;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        log::warn!("[RECONCILE] Missed {missed} birthday changes, reconciling");
                        self.reconcile().await;
                    }
                    Err(RecvError::Closed) => {
                        log::info!("Birthday change feed closed, stopping runner");
                        break;
                    }
                },
            }
        }

        self.service.set_reconciles_mutations(true);
    }

    async fn reconcile(&self) {
        if let Err(e) = self.service.refresh(self.user_id, local_today()).await {
            log::error!("[RECONCILE] Failed to load birthdays for user {}: {e}", self.user_id);
        }
    }
}
