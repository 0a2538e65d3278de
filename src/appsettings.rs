use chrono::NaiveTime;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::{birthday::NewBirthday, user::UserId};

pub const DEFAULT_TITLE: &str = "Recordatorio de Cumpleaños";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub delivery_time: NaiveTime,
    pub title: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            delivery_time: NaiveTime::from_hms_opt(9, 0, 0).expect("This is always in bounds."),
            title: DEFAULT_TITLE.to_owned(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct UserSettings {
    pub id: UserId,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub notifications: NotificationSettings,
    pub user: UserSettings,
    #[serde(default)]
    pub birthdays: Vec<NewBirthday>,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("notifications.delivery_time", "09:00:00")?
            .set_default("notifications.title", DEFAULT_TITLE)?
            .set_default("user.id", 1_i64)
    }
}
