//! Idle/orphan reaper.
//!
//! One background task per registry instance. Each cycle releases pooled
//! sub-connections that have been idle past the configured threshold, then
//! force-removes entries whose reference count has been zero for at least
//! the defer-close grace window. The task only ever goes through the
//! registry's public operations; all the actual map work lives in
//! [`ConnectionRegistry::run_reap_cycle`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::lifecycle::Shutdown;
use crate::registry::map::ConnectionRegistry;

/// Fixed cadence between reap cycles.
const REAP_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic background task aging out idle and orphaned connections.
pub struct Reaper {
    registry: Arc<ConnectionRegistry>,
}

impl Reaper {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Spawn the reaper if the current configuration gives it any work
    /// (idle-timeout or defer-close active). Returns the task handle to
    /// join at teardown, after triggering the shutdown signal.
    pub fn spawn_if_enabled(
        registry: &Arc<ConnectionRegistry>,
        shutdown: &Shutdown,
    ) -> Option<JoinHandle<()>> {
        if !registry.settings().reaper_enabled() {
            tracing::info!("Reaper not started: idle-timeout and defer-close both inactive");
            return None;
        }
        let reaper = Reaper::new(Arc::clone(registry));
        Some(tokio::spawn(reaper.run(shutdown.subscribe())))
    }

    /// Run until the shutdown signal fires. The sleep between cycles is
    /// interruptible, so teardown is prompt.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = REAP_INTERVAL.as_secs(),
            "Reaper starting"
        );

        let mut ticker = time::interval(REAP_INTERVAL);
        // The first tick fires immediately; skip it so a cycle never runs
        // before the registry has seen any traffic.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.registry.run_reap_cycle();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Reaper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
