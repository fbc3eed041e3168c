use std::time::Duration;

use async_trait::async_trait;
use eyre::Error;
use gate::Gate;
use log::error;
use tokio::time::{self, MissedTickBehavior};

pub mod process;

use process::subscription::SubscriptionSweep;

/// A periodic background job. One firing runs to completion before the
/// next tick is taken, so runs of the same task never overlap.
#[async_trait]
pub trait Task: Send + 'static {
    const NAME: &'static str;
    const PERIOD: Duration;

    async fn process(&mut self) -> Result<(), Error>;
}

/// Spawn every background task. Called once from main.
pub fn start(gate: Gate) {
    spawn(SubscriptionSweep::new(gate));
}

fn spawn<T: Task>(mut task: T) {
    tokio::spawn(async move {
        let mut interval = time::interval(T::PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(err) = task.process().await {
                error!("Background task {} failed: {:#}", T::NAME, err);
            }
        }
    });
}
