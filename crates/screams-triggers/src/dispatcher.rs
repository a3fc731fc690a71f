//! Trigger dispatcher: runs every subscribed handler for one event.
//!
//! Handlers run sequentially in registration order. Each invocation is
//! bounded by the configured timeout. A failing or timed-out handler is
//! logged and the remaining handlers still run; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use screams_core::events::DocumentEvent;

use crate::handler::TriggerPoint;
use crate::registry::TriggerRegistry;

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that completed successfully.
    pub succeeded: usize,
    /// Handlers that returned an error.
    pub failed: usize,
    /// Handlers that exceeded the timeout.
    pub timed_out: usize,
}

impl DispatchReport {
    /// Total handlers invoked.
    pub fn invoked(&self) -> usize {
        self.succeeded + self.failed + self.timed_out
    }
}

/// Dispatches events to registered trigger handlers.
#[derive(Debug)]
pub struct TriggerDispatcher {
    registry: Arc<TriggerRegistry>,
    handler_timeout: Duration,
}

impl TriggerDispatcher {
    /// Creates a new dispatcher.
    pub fn new(registry: Arc<TriggerRegistry>, handler_timeout: Duration) -> Self {
        Self {
            registry,
            handler_timeout,
        }
    }

    /// Runs every handler subscribed to the event's trigger point.
    pub async fn dispatch(&self, event: &DocumentEvent) -> DispatchReport {
        let point = TriggerPoint::of(event);
        let handlers = self.registry.handlers_for(&point).await;
        let mut report = DispatchReport::default();

        if handlers.is_empty() {
            return report;
        }

        debug!(
            point = %point,
            document_id = %event.document_id,
            handler_count = handlers.len(),
            "Dispatching trigger"
        );

        for handler in &handlers {
            match tokio::time::timeout(self.handler_timeout, handler.handle(event)).await {
                Ok(Ok(())) => {
                    report.succeeded += 1;
                }
                Ok(Err(e)) => {
                    error!(
                        point = %point,
                        handler = %handler.name(),
                        document_id = %event.document_id,
                        error = %e,
                        "Trigger handler failed"
                    );
                    report.failed += 1;
                }
                Err(_) => {
                    error!(
                        point = %point,
                        handler = %handler.name(),
                        document_id = %event.document_id,
                        timeout_seconds = self.handler_timeout.as_secs(),
                        "Trigger handler timed out"
                    );
                    report.timed_out += 1;
                }
            }
        }

        report
    }
}
