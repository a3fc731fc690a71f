//! Trigger runner: consumes the event stream and dispatches each event.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore, watch};
use tracing::{info, trace, warn};

use screams_core::config::TriggerConfig;
use screams_core::events::{DocumentEvent, EventStream};
use screams_core::types::Collection;

use crate::dispatcher::TriggerDispatcher;

/// Per-document locks keeping events of one document in commit order.
type DocumentLocks = HashMap<(Collection, String), Arc<Mutex<()>>>;

/// Background consumer of document change events.
///
/// In production [`run`](Self::run) is spawned once and handles each event
/// on its own task, bounded by `max_concurrency`. Events of the same
/// document never overlap: a like's `Deleted` event waits until its
/// `Created` event has been handled. Tests call
/// [`drain_pending`](Self::drain_pending) instead to process events inline.
#[derive(Debug)]
pub struct TriggerRunner {
    dispatcher: Arc<TriggerDispatcher>,
    stream: Mutex<EventStream>,
    config: TriggerConfig,
}

impl TriggerRunner {
    /// Creates a runner over an event stream.
    pub fn new(dispatcher: Arc<TriggerDispatcher>, stream: EventStream, config: TriggerConfig) -> Self {
        Self {
            dispatcher,
            stream: Mutex::new(stream),
            config,
        }
    }

    /// Runs until the cancel signal is received or every publisher is gone.
    ///
    /// On the way out, events still queued (and any they cause) are
    /// dispatched and in-flight handlers awaited, all bounded by
    /// `drain_timeout_seconds`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        let max_concurrency = self.config.max_concurrency.max(1);
        info!(
            max_concurrency,
            handler_timeout_seconds = self.config.handler_timeout_seconds,
            "Trigger runner started"
        );

        let semaphore = Arc::new(Semaphore::new(max_concurrency));
        let mut locks = DocumentLocks::new();
        let mut stream = self.stream.lock().await;

        loop {
            let permit = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Trigger runner received shutdown signal");
                        break;
                    }
                    continue;
                }
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(p) => p,
                    Err(_) => break,
                },
            };

            let event = tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Trigger runner received shutdown signal");
                        break;
                    }
                    continue;
                }
                event = stream.recv() => match event {
                    Some(event) => event,
                    None => {
                        info!("Event stream closed");
                        break;
                    }
                },
            };

            trace!(collection = %event.collection, kind = %event.kind, "Event received");
            self.spawn_dispatch(event, permit, &mut locks).await;
        }

        info!("Trigger runner flushing queued events");
        let all = u32::try_from(max_concurrency).unwrap_or(u32::MAX);
        let drain = Duration::from_secs(self.config.drain_timeout_seconds);
        let flush = self.flush(&mut stream, &semaphore, &mut locks, all);
        match tokio::time::timeout(drain, flush).await {
            Ok(flushed) => info!(flushed, "Queued events dispatched"),
            Err(_) => warn!(
                drain_timeout_seconds = self.config.drain_timeout_seconds,
                "Drain timed out, remaining events dropped"
            ),
        }

        info!("Trigger runner shut down");
    }

    /// Processes every queued event inline, including events produced by the
    /// handlers themselves, until the stream is empty. Returns how many
    /// events were processed.
    ///
    /// Must not be called while [`run`](Self::run) is active.
    pub async fn drain_pending(&self) -> usize {
        let mut stream = self.stream.lock().await;
        let mut processed = 0;
        while let Some(event) = stream.try_recv() {
            self.dispatcher.dispatch(&event).await;
            processed += 1;
        }
        processed
    }

    /// Spawns the dispatch of one event once the previous event of the same
    /// document has finished.
    async fn spawn_dispatch(
        &self,
        event: DocumentEvent,
        permit: OwnedSemaphorePermit,
        locks: &mut DocumentLocks,
    ) {
        // Entries only the map still holds belong to finished documents.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        let lock = Arc::clone(
            locks
                .entry((event.collection, event.document_id.clone()))
                .or_default(),
        );
        let guard = lock.lock_owned().await;

        let dispatcher = Arc::clone(&self.dispatcher);
        tokio::spawn(async move {
            let _permit = permit;
            let _guard = guard;
            dispatcher.dispatch(&event).await;
        });
    }

    /// Dispatches whatever is queued, waits for every in-flight handler and
    /// repeats until handlers stop producing events.
    async fn flush(
        &self,
        stream: &mut EventStream,
        semaphore: &Arc<Semaphore>,
        locks: &mut DocumentLocks,
        all: u32,
    ) -> usize {
        let mut flushed = 0;
        loop {
            while let Some(event) = stream.try_recv() {
                let Ok(permit) = semaphore.clone().acquire_owned().await else {
                    return flushed;
                };
                self.spawn_dispatch(event, permit, locks).await;
                flushed += 1;
            }

            if semaphore.acquire_many(all).await.is_err() || stream.is_empty() {
                return flushed;
            }
        }
    }
}
