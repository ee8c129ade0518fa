//! Synchronous serialize-and-log event sink.

use tracing::info;

use super::RegistryEventSink;
use crate::model::RegistryEvent;
use crate::EventError;

/// Renders each event as one JSON log line.
#[derive(Debug, Default)]
pub struct LoggingEventSink;

impl RegistryEventSink for LoggingEventSink {
    fn consume_event(
        &self,
        event: RegistryEvent,
    ) -> std::result::Result<(), EventError> {
        let payload =
            serde_json::to_string(&event).map_err(|e| EventError::Serialization(e.to_string()))?;
        info!(kind = ?event.kind, shell_id = %event.shell_id, "registry event: {payload}");
        Ok(())
    }
}
