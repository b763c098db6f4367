use crate::error::{MirrorError, Result};
use crate::sync::output::{MirrorEvent, Reporter};
use crate::sync::SyncEngine;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Events buffered between the OS watcher thread and the handler
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Watch mode: mirror shaders as they change until interrupted
pub struct WatchMode {
    engine: SyncEngine,
    root: PathBuf,
    reporter: Reporter,
}

impl WatchMode {
    pub fn new(engine: SyncEngine, root: PathBuf, reporter: Reporter) -> Self {
        Self {
            engine,
            root,
            reporter,
        }
    }

    /// Run until Ctrl-C (or SIGTERM on unix)
    ///
    /// Events are handled one at a time in arrival order. A watcher error is
    /// fatal and returned; a clean shutdown returns `Ok`.
    pub async fn watch(self) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<notify::Result<Event>>(EVENT_QUEUE_CAPACITY);

        // The callback runs on notify's own thread, outside the runtime
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|source| MirrorError::WatchRoot {
                path: self.root.clone(),
                source,
            })?;

        tracing::info!("Watching {} for shader changes", self.root.display());

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            // Shutdown first so the signal handlers are installed before any
            // event is handled
            tokio::select! {
                biased;

                result = &mut shutdown => {
                    result?;
                    tracing::info!("Shutdown requested, stopping watcher");
                    break;
                }
                received = rx.recv() => match received {
                    Some(Ok(event)) => {
                        for report in self.engine.handle_event(&event).await {
                            self.reporter.report(&report);
                        }
                    }
                    Some(Err(err)) => return Err(MirrorError::Watcher(err)),
                    None => break,
                },
            }
        }

        // Dropping the watcher releases the OS watches
        drop(watcher);

        if self.reporter.is_json() {
            MirrorEvent::Stop.emit();
        }

        Ok(())
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate()).map_err(MirrorError::Signal)?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map_err(MirrorError::Signal),
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c().await.map_err(MirrorError::Signal)
}
