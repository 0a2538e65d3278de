use std::sync::Arc;

use birthday_reminder::{
    appsettings::AppSettings,
    delivery::{LocalNotificationCenter, LogPresenter},
    occurrence::local_today,
    runner::ReconciliationRunner,
    scheduling::BirthdayNotificationScheduler,
    service::{BirthdayService, ListFilter},
    storage::InMemoryBirthdayStorage,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load()?;
    let user_id = settings.user.id;
    let notification_settings = settings.notifications.clone();
    log::info!("Starting birthday reminder for user {user_id}");

    let storage = Arc::new(InMemoryBirthdayStorage::new());
    let notification_center = Arc::new(LocalNotificationCenter::new(Arc::new(LogPresenter)));
    let scheduler =
        BirthdayNotificationScheduler::new(notification_center, notification_settings.clone());
    let service = Arc::new(BirthdayService::new(storage, scheduler));
    service.enable_notifications().await;

    let cancellation_token = CancellationToken::new();
    let runner = ReconciliationRunner::new(
        Arc::clone(&service),
        user_id,
        notification_settings.delivery_time,
    )
    .spawn(cancellation_token.clone());

    let today = local_today();
    for birthday in settings.birthdays {
        service.add_birthday(user_id, birthday, today).await?;
    }

    for upcoming in service
        .upcoming(user_id, today, ListFilter::All, None)
        .await?
    {
        log::info!(
            "{} ({}): {} [{}]",
            upcoming.record.name,
            upcoming.record.birthday_date.format("%d-%m"),
            upcoming.label,
            upcoming.urgency.color()
        );
    }

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");
    cancellation_token.cancel();
    runner.await?;

    Ok(())
}
