use std::sync::Arc;

use chrono::Utc;
use eyre::Result;
use log::info;
use model::delivery::Delivery;
use model::store::{UserStore, UserUpdate};
use model::user::UserAccount;

mod decide;
mod sweep;
#[cfg(test)]
mod testing;

pub use decide::{Decided, Decision};
pub use sweep::SweepReport;

/// The domain core: holds the injected store and delivery handles and owns
/// every mutation of the user table. Constructed once at startup and cloned
/// into the bot glue and the background sweep.
#[derive(Clone)]
pub struct Gate {
    store: Arc<dyn UserStore>,
    delivery: Arc<dyn Delivery>,
    admin_id: i64,
}

impl Gate {
    pub fn new(store: Arc<dyn UserStore>, delivery: Arc<dyn Delivery>, admin_id: i64) -> Gate {
        Gate {
            store,
            delivery,
            admin_id,
        }
    }

    pub fn is_admin(&self, tg_id: i64) -> bool {
        tg_id == self.admin_id
    }

    pub fn admin_id(&self) -> i64 {
        self.admin_id
    }

    pub async fn get(&self, tg_id: i64) -> Result<Option<UserAccount>> {
        self.store.get(tg_id).await
    }

    /// Create-on-first-contact. Returns the existing record unchanged when
    /// the user already wrote to the bot before.
    pub async fn register(
        &self,
        tg_id: i64,
        full_name: &str,
        username: Option<&str>,
    ) -> Result<UserAccount> {
        if let Some(user) = self.store.get(tg_id).await? {
            return Ok(user);
        }
        info!("Registering new user {}", tg_id);
        let user = UserAccount::new(tg_id, full_name, username);
        self.store.insert(user.clone()).await?;
        Ok(user)
    }

    /// Record the submitted payment screenshot. Creates the record when the
    /// photo arrives before any other contact.
    pub async fn attach_proof(
        &self,
        tg_id: i64,
        username: Option<&str>,
        file_id: &str,
    ) -> Result<()> {
        if self.store.get(tg_id).await?.is_none() {
            let mut user = UserAccount::new(tg_id, "", username);
            user.payment_proof = Some(file_id.to_owned());
            self.store.insert(user).await?;
            return Ok(());
        }
        self.store
            .update(
                tg_id,
                UserUpdate {
                    payment_proof: Some(file_id.to_owned()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// The submission's second half: the name as printed on the receipt.
    pub async fn set_full_name(&self, tg_id: i64, full_name: &str) -> Result<()> {
        self.store
            .update(
                tg_id,
                UserUpdate {
                    full_name: Some(full_name.to_owned()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    pub async fn pending_approvals(&self) -> Result<Vec<UserAccount>> {
        self.store.find_pending().await
    }

    pub async fn banned_users(&self) -> Result<Vec<UserAccount>> {
        self.store.find_banned().await
    }

    pub async fn stats(&self) -> Result<Stats> {
        let users = self.store.find_all().await?;
        let now = Utc::now();
        let mut stats = Stats {
            total: users.len() as u64,
            ..Default::default()
        };
        for user in &users {
            if user.subscription_active(now) {
                stats.active += 1;
            }
            if user.banned {
                stats.banned += 1;
            } else if !user.approved {
                stats.pending += 1;
            }
        }
        Ok(stats)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub total: u64,
    pub active: u64,
    pub pending: u64,
    pub banned: u64,
}
