use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;

use crate::user::UserAccount;

/// Partial-field update; only the populated fields are written. Every
/// update call is a single atomic write on the backing store.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub approved: Option<bool>,
    pub banned: Option<bool>,
    pub subscription_end: Option<DateTime<Utc>>,
    pub payment_proof: Option<String>,
}

impl UserUpdate {
    /// The fields an approval, rejection or expiry decision writes back.
    pub fn decision_fields(user: &UserAccount) -> UserUpdate {
        UserUpdate {
            approved: Some(user.approved),
            banned: Some(user.banned),
            subscription_end: user.subscription_end,
            ..Default::default()
        }
    }
}

/// The only shared mutable resource in the system. Mutated exclusively by
/// the approval workflow and the subscription sweep.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails on a duplicate `tg_id` without corrupting existing state.
    async fn insert(&self, user: UserAccount) -> Result<()>;

    async fn get(&self, tg_id: i64) -> Result<Option<UserAccount>>;

    /// Returns the updated record, or `None` when the user does not exist.
    async fn update(&self, tg_id: i64, update: UserUpdate) -> Result<Option<UserAccount>>;

    async fn find_all(&self) -> Result<Vec<UserAccount>>;

    /// Unapproved, unbanned users awaiting an administrator decision.
    async fn find_pending(&self) -> Result<Vec<UserAccount>>;

    async fn find_banned(&self) -> Result<Vec<UserAccount>>;

    async fn count(&self) -> Result<u64>;
}
