use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eyre::{eyre, Result};
use model::delivery::{Delivery, DeliveryError};
use model::store::{UserStore, UserUpdate};
use model::user::UserAccount;

use crate::Gate;

const ADMIN_ID: i64 = 100;

pub fn gate_with(users: Vec<UserAccount>, delivery: Arc<dyn Delivery>) -> (Gate, Arc<MemStore>) {
    let store = Arc::new(MemStore::new(users));
    let gate = Gate::new(store.clone(), delivery, ADMIN_ID);
    (gate, store)
}

pub struct MemStore {
    users: Mutex<BTreeMap<i64, UserAccount>>,
}

impl MemStore {
    fn new(users: Vec<UserAccount>) -> MemStore {
        MemStore {
            users: Mutex::new(users.into_iter().map(|u| (u.tg_id, u)).collect()),
        }
    }

    pub fn by_id(&self, tg_id: i64) -> UserAccount {
        self.users
            .lock()
            .unwrap()
            .get(&tg_id)
            .cloned()
            .unwrap_or_else(|| panic!("no user {} in test store", tg_id))
    }

    pub fn all(&self) -> Vec<UserAccount> {
        self.users.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn insert(&self, user: UserAccount) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.tg_id) {
            return Err(eyre!("User already exists"));
        }
        users.insert(user.tg_id, user);
        Ok(())
    }

    async fn get(&self, tg_id: i64) -> Result<Option<UserAccount>> {
        Ok(self.users.lock().unwrap().get(&tg_id).cloned())
    }

    async fn update(&self, tg_id: i64, update: UserUpdate) -> Result<Option<UserAccount>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&tg_id) else {
            return Ok(None);
        };
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(username) = update.username {
            user.username = Some(username);
        }
        if let Some(approved) = update.approved {
            user.approved = approved;
        }
        if let Some(banned) = update.banned {
            user.banned = banned;
        }
        if let Some(end) = update.subscription_end {
            user.subscription_end = Some(end);
        }
        if let Some(proof) = update.payment_proof {
            user.payment_proof = Some(proof);
        }
        Ok(Some(user.clone()))
    }

    async fn find_all(&self) -> Result<Vec<UserAccount>> {
        Ok(self.all())
    }

    async fn find_pending(&self) -> Result<Vec<UserAccount>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|u| !u.approved && !u.banned)
            .collect())
    }

    async fn find_banned(&self) -> Result<Vec<UserAccount>> {
        Ok(self.all().into_iter().filter(|u| u.banned).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Notify(i64, String),
    Grant(i64),
    Revoke(i64),
}

pub type AttemptLog = Arc<Mutex<Vec<Attempt>>>;

struct RecordingDelivery {
    attempts: AttemptLog,
}

#[async_trait]
impl Delivery for RecordingDelivery {
    async fn notify(&self, tg_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.attempts
            .lock()
            .unwrap()
            .push(Attempt::Notify(tg_id, text.to_owned()));
        Ok(())
    }

    async fn grant_access(&self, tg_id: i64) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(Attempt::Grant(tg_id));
        Ok(())
    }

    async fn revoke_access(&self, tg_id: i64) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(Attempt::Revoke(tg_id));
        Ok(())
    }
}

pub fn recording_delivery() -> (Arc<dyn Delivery>, AttemptLog) {
    let attempts: AttemptLog = Arc::default();
    (
        Arc::new(RecordingDelivery {
            attempts: attempts.clone(),
        }),
        attempts,
    )
}

pub fn silent_delivery() -> Arc<dyn Delivery> {
    recording_delivery().0
}

struct FailingDelivery;

#[async_trait]
impl Delivery for FailingDelivery {
    async fn notify(&self, _: i64, _: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError(eyre!("chat unavailable")))
    }

    async fn grant_access(&self, _: i64) -> Result<(), DeliveryError> {
        Err(DeliveryError(eyre!("channel unavailable")))
    }

    async fn revoke_access(&self, _: i64) -> Result<(), DeliveryError> {
        Err(DeliveryError(eyre!("channel unavailable")))
    }
}

pub fn failing_delivery() -> Arc<dyn Delivery> {
    Arc::new(FailingDelivery)
}
