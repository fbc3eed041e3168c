use chrono::{DateTime, Utc};
use log::{info, warn};
use model::errors::GateError;
use model::store::UserUpdate;

use crate::Gate;

fn approved_text(until: DateTime<Utc>) -> String {
    format!(
        "🎉 Your payment has been approved! You now have 30 days \
         of access to our premium channel.\n\
         Subscription until: {}\n\n\
         ⚠️ Note: after 30 days you must complete a new payment and approval process \
         to continue access.",
        until.format("%Y-%m-%d %H:%M")
    )
}

const REJECTED_TEXT: &str = "❌ Your payment was rejected. Please check your \
    credentials and try again, or contact support.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decided {
    Approved { until: DateTime<Utc> },
    Rejected,
}

impl Gate {
    /// Apply an administrator's decision for `target`. The store mutation is
    /// committed before any side effect is attempted; channel grant and
    /// notification are best-effort and independent of each other.
    pub async fn decide(
        &self,
        actor: i64,
        target: i64,
        decision: Decision,
    ) -> Result<Decided, GateError> {
        if !self.is_admin(actor) {
            return Err(GateError::Unauthorized { actor });
        }

        let mut user = self
            .store
            .get(target)
            .await?
            .ok_or(GateError::UserNotFound(target))?;

        match decision {
            Decision::Approve => {
                let until = user.approve(Utc::now());
                self.store
                    .update(target, UserUpdate::decision_fields(&user))
                    .await?
                    .ok_or(GateError::UserNotFound(target))?;
                info!("Approved user {} until {}", target, until);

                if let Err(err) = self.delivery.grant_access(target).await {
                    warn!("Failed to grant channel access to {}: {}", target, err);
                }
                if let Err(err) = self.delivery.notify(target, &approved_text(until)).await {
                    warn!("Failed to notify {} about approval: {}", target, err);
                }
                Ok(Decided::Approved { until })
            }
            Decision::Reject => {
                user.reject();
                self.store
                    .update(target, UserUpdate::decision_fields(&user))
                    .await?
                    .ok_or(GateError::UserNotFound(target))?;
                info!("Rejected and banned user {}", target);

                if let Err(err) = self.delivery.notify(target, REJECTED_TEXT).await {
                    warn!("Failed to notify {} about rejection: {}", target, err);
                }
                Ok(Decided::Rejected)
            }
        }
    }
}
