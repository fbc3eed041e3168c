use std::time::Duration;

use async_trait::async_trait;
use eyre::Error;
use gate::Gate;
use log::info;

use crate::Task;

/// Hourly enforcement of subscription expiry: bans overdue users and warns
/// the ones entering the last day of their window.
pub struct SubscriptionSweep {
    gate: Gate,
}

impl SubscriptionSweep {
    pub fn new(gate: Gate) -> SubscriptionSweep {
        SubscriptionSweep { gate }
    }
}

#[async_trait]
impl Task for SubscriptionSweep {
    const NAME: &'static str = "subscription-sweep";
    const PERIOD: Duration = Duration::from_secs(60 * 60);

    async fn process(&mut self) -> Result<(), Error> {
        let report = self.gate.sweep_once().await?;
        if !report.is_empty() {
            info!(
                "Subscription sweep: {} expired, {} warned",
                report.expired, report.warned
            );
        }
        Ok(())
    }
}
