use async_trait::async_trait;
use thiserror::Error;

/// A notification or channel-membership call that failed. Callers log it
/// and move on; it never rolls back a store mutation.
#[derive(Error, Debug)]
#[error("Delivery failed: {0}")]
pub struct DeliveryError(#[from] pub eyre::Error);

/// Outbound side effects against the messaging platform. Every call is
/// best-effort: attempted once, no retries.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Direct message to a user.
    async fn notify(&self, tg_id: i64, text: &str) -> Result<(), DeliveryError>;

    /// Let the user into the private channel.
    async fn grant_access(&self, tg_id: i64) -> Result<(), DeliveryError>;

    /// Kick the user out of the private channel.
    async fn revoke_access(&self, tg_id: i64) -> Result<(), DeliveryError>;
}
