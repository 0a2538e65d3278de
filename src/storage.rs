mod in_memory;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::{
    birthday::{BirthdayId, BirthdayRecord, NewBirthday, UpdateBirthday},
    user::UserId,
};

pub use in_memory::InMemoryBirthdayStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Birthday {0} does not exist")]
    NotFound(BirthdayId),

    #[error("Invalid birthday record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayChange {
    pub user_id: UserId,
    pub birthday_id: BirthdayId,
    pub kind: ChangeKind,
}

#[async_trait]
pub trait BirthdayStorage: Send + Sync {
    async fn list(&self, user_id: UserId) -> Result<Vec<BirthdayRecord>, StorageError>;
    async fn get(&self, id: BirthdayId) -> Result<Option<BirthdayRecord>, StorageError>;
    async fn insert(
        &self,
        user_id: UserId,
        birthday: NewBirthday,
    ) -> Result<BirthdayRecord, StorageError>;
    async fn update(
        &self,
        id: BirthdayId,
        update: UpdateBirthday,
    ) -> Result<BirthdayRecord, StorageError>;
    async fn delete(&self, id: BirthdayId) -> Result<(), StorageError>;

    fn subscribe(&self) -> broadcast::Receiver<BirthdayChange>;
}

pub(crate) fn validate_name(name: &str) -> Result<String, StorageError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidRecord("name must not be empty".to_owned()));
    }

    Ok(trimmed.to_owned())
}
