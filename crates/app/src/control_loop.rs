//! Periodic control loop driving a [`ClimateController`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::controller::ClimateController;
use crate::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};

/// Default cadence between control cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Spawn a task that runs a control cycle every `interval` until `shutdown`
/// changes or its sender is dropped.
///
/// The first cycle runs immediately. Cycle errors are logged and the loop
/// keeps going.
pub fn spawn<R, S, C, A>(
    controller: Arc<ClimateController<R, S, C, A>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    tokio::spawn(async move {
        tracing::info!(interval_secs = interval.as_secs(), "control loop started");
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match controller.run_cycle().await {
                        Ok(outcome) => tracing::debug!(?outcome, "control cycle finished"),
                        Err(err) => tracing::error!(error = %err, "control cycle failed"),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }

        tracing::info!("control loop stopped");
    })
}
