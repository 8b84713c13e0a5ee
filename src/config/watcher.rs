//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::config::loader::load_config;
use crate::config::schema::RegistryConfig;
use crate::config::settings::RegistrySettings;

/// A watcher that monitors the configuration file for changes.
///
/// Reloads that fail to parse or validate are logged and dropped; the
/// running configuration is kept.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RegistryConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration
    /// updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RegistryConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Apply validated reloads to the shared settings until shutdown.
///
/// Runs as a background task next to the reaper; each received config is
/// published through [`RegistrySettings::apply`], making the new scalar
/// values visible to in-flight operations without restarting the registry.
pub async fn apply_updates(
    settings: Arc<RegistrySettings>,
    mut updates: mpsc::UnboundedReceiver<RegistryConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Some(config) => {
                        tracing::info!(
                            idle_timeout_secs = config.idle_timeout_secs,
                            defer_close_secs = config.defer_close_secs,
                            "Applying reloaded configuration"
                        );
                        settings.apply(config);
                    }
                    None => break,
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Config apply loop received shutdown signal, exiting");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[tokio::test]
    async fn apply_loop_publishes_updates() {
        let settings = Arc::new(RegistrySettings::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        let task = tokio::spawn(apply_updates(
            Arc::clone(&settings),
            rx,
            shutdown.subscribe(),
        ));

        let mut config = RegistryConfig::default();
        config.defer_close_secs = 9;
        tx.send(config).unwrap();

        // closing the sender ends the loop after draining
        drop(tx);
        task.await.unwrap();

        assert_eq!(settings.defer_close(), Duration::from_secs(9));
    }

    #[tokio::test]
    async fn apply_loop_stops_on_shutdown() {
        let settings = Arc::new(RegistrySettings::default());
        let (_tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        let task = tokio::spawn(apply_updates(
            Arc::clone(&settings),
            rx,
            shutdown.subscribe(),
        ));
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("apply loop should exit promptly")
            .unwrap();
    }
}
