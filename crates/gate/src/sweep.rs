use chrono::Utc;
use eyre::Result;
use log::{error, info, warn};
use model::store::UserUpdate;
use model::user::SweepStatus;

use crate::Gate;

const EXPIRED_TEXT: &str = "❌ Your subscription has expired. You've been removed \
    from the premium channel.\n\n\
    To regain access, you must make a new payment and go through the approval \
    process again.";

const WARNING_TEXT: &str = "⚠️ Your subscription expires in 24 hours!\n\n\
    After expiration you will lose channel access and must complete a new \
    payment and approval process to regain it.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: u64,
    pub warned: u64,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.expired == 0 && self.warned == 0
    }
}

impl Gate {
    /// One full pass over the user table: expire overdue subscriptions and
    /// warn the ones inside the last day. A failure on one record never
    /// stops the pass; pending and banned users are skipped entirely.
    pub async fn sweep_once(&self) -> Result<SweepReport> {
        let now = Utc::now();
        let users = self.store.find_all().await?;
        let mut report = SweepReport::default();

        for mut user in users {
            match user.sweep_status(now) {
                Some(SweepStatus::Expired) => {
                    if let Err(err) = self.delivery.revoke_access(user.tg_id).await {
                        warn!("Failed to revoke channel access for {}: {}", user.tg_id, err);
                    }
                    user.expire();
                    match self
                        .store
                        .update(user.tg_id, UserUpdate::decision_fields(&user))
                        .await
                    {
                        Ok(_) => {
                            report.expired += 1;
                            info!("Expired subscription of user {}", user.tg_id);
                            if let Err(err) = self.delivery.notify(user.tg_id, EXPIRED_TEXT).await {
                                warn!("Failed to notify {} about expiry: {}", user.tg_id, err);
                            }
                        }
                        Err(err) => {
                            error!("Failed to persist expiry of {}: {:#}", user.tg_id, err);
                        }
                    }
                }
                Some(SweepStatus::ExpiresSoon) => {
                    if let Err(err) = self.delivery.notify(user.tg_id, WARNING_TEXT).await {
                        warn!("Failed to warn {} about expiry: {}", user.tg_id, err);
                    }
                    report.warned += 1;
                }
                None => {}
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{failing_delivery, gate_with, recording_delivery, Attempt};
    use chrono::Duration;
    use model::user::UserAccount;

    fn approved_until(tg_id: i64, end: chrono::DateTime<Utc>) -> UserAccount {
        let mut user = UserAccount::new(tg_id, "Member", None);
        user.approved = true;
        user.subscription_end = Some(end);
        user
    }

    #[tokio::test]
    async fn expired_user_is_banned_and_kicked() {
        let now = Utc::now();
        let (delivery, log) = recording_delivery();
        let (gate, store) = gate_with(vec![approved_until(7, now - Duration::hours(1))], delivery);

        let report = gate.sweep_once().await.unwrap();
        assert_eq!(report, SweepReport { expired: 1, warned: 0 });

        let user = store.by_id(7);
        assert!(!user.approved);
        assert!(user.banned);

        let attempts = log.lock().unwrap().clone();
        assert!(attempts.contains(&Attempt::Revoke(7)));
        assert!(attempts.iter().any(|a| matches!(a, Attempt::Notify(7, _))));
    }

    #[tokio::test]
    async fn expiry_mutates_only_the_flags() {
        let now = Utc::now();
        let end = now - Duration::hours(1);
        let mut user = approved_until(7, end);
        user.payment_proof = Some("file-1".to_owned());
        let (delivery, _) = recording_delivery();
        let (gate, store) = gate_with(vec![user], delivery);

        gate.sweep_once().await.unwrap();

        let user = store.by_id(7);
        assert_eq!(user.subscription_end, Some(end));
        assert_eq!(user.payment_proof.as_deref(), Some("file-1"));
        assert_eq!(user.full_name, "Member");
    }

    #[tokio::test]
    async fn warning_window_notifies_without_mutation() {
        let now = Utc::now();
        let end = now + Duration::hours(12);
        let (delivery, log) = recording_delivery();
        let (gate, store) = gate_with(vec![approved_until(7, end)], delivery);

        let report = gate.sweep_once().await.unwrap();
        assert_eq!(report, SweepReport { expired: 0, warned: 1 });

        let user = store.by_id(7);
        assert!(user.approved);
        assert!(!user.banned);
        assert_eq!(user.subscription_end, Some(end));

        let attempts = log.lock().unwrap().clone();
        assert!(attempts.iter().any(|a| matches!(a, Attempt::Notify(7, _))));
        assert!(!attempts.contains(&Attempt::Revoke(7)));
    }

    #[tokio::test]
    async fn pending_and_banned_users_are_skipped() {
        let now = Utc::now();
        let pending = UserAccount::new(1, "Pending", None);
        let mut banned = approved_until(2, now - Duration::days(2));
        banned.expire();
        let (delivery, log) = recording_delivery();
        let (gate, store) = gate_with(vec![pending, banned], delivery);

        let report = gate.sweep_once().await.unwrap();
        assert!(report.is_empty());
        assert!(log.lock().unwrap().is_empty());
        assert!(!store.by_id(1).banned);
    }

    #[tokio::test]
    async fn one_failing_user_does_not_stop_the_pass() {
        let now = Utc::now();
        let users = vec![
            approved_until(1, now - Duration::hours(2)),
            approved_until(2, now - Duration::hours(1)),
        ];
        let (gate, store) = gate_with(users, failing_delivery());

        let report = gate.sweep_once().await.unwrap();
        assert_eq!(report.expired, 2);
        assert!(store.by_id(1).banned);
        assert!(store.by_id(2).banned);
    }

    #[tokio::test]
    async fn far_future_subscriptions_are_untouched() {
        let now = Utc::now();
        let (delivery, log) = recording_delivery();
        let (gate, _) = gate_with(vec![approved_until(7, now + Duration::days(10))], delivery);

        let report = gate.sweep_once().await.unwrap();
        assert!(report.is_empty());
        assert!(log.lock().unwrap().is_empty());
    }
}
