//! Pluggable sinks for committed registry mutations.
//!
//! The event-sending storage decorator constructs one [`RegistryEvent`] per
//! committed mutation and hands it to exactly one configured sink. The call
//! happens synchronously at the commit point, so events for one target leave
//! the store in the order their mutations committed. What the sink does with
//! the event (log line, message-bus handoff) is its own business.

mod broker_sink;
mod logging_sink;


pub use broker_sink::*;
pub use logging_sink::*;

use crate::model::RegistryEvent;
use crate::EventError;

#[cfg(test)]
use mockall::automock;

/// Consumer of committed mutation events.
///
/// A failed consume never rolls back the mutation that produced the event;
/// the caller logs the failure and moves on.
#[cfg_attr(test, automock)]
pub trait RegistryEventSink: Send + Sync {
    fn consume_event(
        &self,
        event: RegistryEvent,
    ) -> std::result::Result<(), EventError>;
}

/// Swallows every event. Used when event emission is configured off.
#[derive(Debug, Default)]
pub struct NoopEventSink;

impl RegistryEventSink for NoopEventSink {
    fn consume_event(
        &self,
        _event: RegistryEvent,
    ) -> std::result::Result<(), EventError> {
        Ok(())
    }
}
