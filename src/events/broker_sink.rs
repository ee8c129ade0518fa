//! Message-bus event sink with best-effort, order-preserving handoff.

use tokio::sync::mpsc;

use super::RegistryEventSink;
use crate::model::RegistryEvent;
use crate::EventError;

/// Hands events to an out-of-band publisher task through a bounded channel.
///
/// The handoff is non-blocking: a saturated channel drops the event
/// ([`EventError::Saturated`]), a gone consumer reports
/// [`EventError::SinkClosed`]. Delivery is best-effort; the core never
/// retries. The channel preserves per-target commit order.
pub struct BrokerEventSink {
    sender: mpsc::Sender<RegistryEvent>,
}

impl BrokerEventSink {
    /// Returns the sink plus the receiving end the surrounding bus publisher
    /// drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RegistryEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl RegistryEventSink for BrokerEventSink {
    fn consume_event(
        &self,
        event: RegistryEvent,
    ) -> std::result::Result<(), EventError> {
        self.sender.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EventError::Saturated,
            mpsc::error::TrySendError::Closed(_) => EventError::SinkClosed,
        })
    }
}
