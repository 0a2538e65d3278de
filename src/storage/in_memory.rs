use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use super::{BirthdayChange, BirthdayStorage, ChangeKind, StorageError, validate_name};
use crate::{
    birthday::{BirthdayId, BirthdayRecord, NewBirthday, UpdateBirthday},
    user::UserId,
};

const CHANGES_CAPACITY: usize = 64;

struct InMemoryStore {
    next_id: BirthdayId,
    records: HashMap<BirthdayId, BirthdayRecord>,
}

pub struct InMemoryBirthdayStorage {
    store: RwLock<InMemoryStore>,
    changes: broadcast::Sender<BirthdayChange>,
}

impl InMemoryBirthdayStorage {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGES_CAPACITY);
        InMemoryBirthdayStorage {
            store: RwLock::new(InMemoryStore {
                next_id: 1,
                records: HashMap::new(),
            }),
            changes,
        }
    }

    fn publish(&self, user_id: UserId, birthday_id: BirthdayId, kind: ChangeKind) {
        // No subscribers is fine.
        let _ = self.changes.send(BirthdayChange {
            user_id,
            birthday_id,
            kind,
        });
    }
}

impl Default for InMemoryBirthdayStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BirthdayStorage for InMemoryBirthdayStorage {
    async fn list(&self, user_id: UserId) -> Result<Vec<BirthdayRecord>, StorageError> {
        let store = self.store.read().await;
        let mut records: Vec<_> = store
            .records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.birthday_date, r.id));

        Ok(records)
    }

    async fn get(&self, id: BirthdayId) -> Result<Option<BirthdayRecord>, StorageError> {
        let store = self.store.read().await;
        Ok(store.records.get(&id).cloned())
    }

    async fn insert(
        &self,
        user_id: UserId,
        birthday: NewBirthday,
    ) -> Result<BirthdayRecord, StorageError> {
        let name = validate_name(&birthday.name)?;

        let record = {
            let mut store = self.store.write().await;
            let id = store.next_id;
            let record = BirthdayRecord {
                id,
                user_id,
                name,
                birthday_date: birthday.birthday_date,
                location: birthday.location,
                phone: birthday.phone,
                area: birthday.area,
            };

            store.records.insert(id, record.clone());
            store.next_id += 1;
            record
        };

        log::info!("Inserted birthday {} for user {}", record.id, user_id);
        self.publish(user_id, record.id, ChangeKind::Created);
        Ok(record)
    }

    async fn update(
        &self,
        id: BirthdayId,
        update: UpdateBirthday,
    ) -> Result<BirthdayRecord, StorageError> {
        let name = update.name.as_deref().map(validate_name).transpose()?;

        let record = {
            let mut store = self.store.write().await;
            let record = store
                .records
                .get_mut(&id)
                .ok_or(StorageError::NotFound(id))?;

            if let Some(name) = name {
                record.name = name;
            }
            if let Some(birthday_date) = update.birthday_date {
                record.birthday_date = birthday_date;
            }
            if update.location.is_some() {
                record.location = update.location;
            }
            if update.phone.is_some() {
                record.phone = update.phone;
            }
            if update.area.is_some() {
                record.area = update.area;
            }

            record.clone()
        };

        self.publish(record.user_id, id, ChangeKind::Updated);
        Ok(record)
    }

    async fn delete(&self, id: BirthdayId) -> Result<(), StorageError> {
        let removed = self.store.write().await.records.remove(&id);
        let record = removed.ok_or(StorageError::NotFound(id))?;

        self.publish(record.user_id, id, ChangeKind::Deleted);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<BirthdayChange> {
        self.changes.subscribe()
    }
}
