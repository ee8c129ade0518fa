//! Builds the storage stack from settings.
//!
//! Construction is explicit: each decorator wraps the previous one in a
//! fixed order, outermost to innermost: thread-safety, cursor encoding,
//! optional deep-copy, event sending, core store. The event-sending layer
//! sits directly on the core so events fire exactly when a mutation has
//! committed, and every outer layer observes the same committed order.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::EventSinkKind;
use crate::config::RegistrySettings;
use crate::config::StorageBackend;
use crate::discovery::AasDiscoveryStorage;
use crate::discovery::CursorEncodingDiscoveryStorage;
use crate::discovery::InMemoryDiscoveryStorage;
use crate::events::BrokerEventSink;
use crate::events::LoggingEventSink;
use crate::events::NoopEventSink;
use crate::events::RegistryEventSink;
use crate::model::RegistryEvent;
use crate::storage::AasRegistryStorage;
use crate::storage::CloningRegistryStorage;
use crate::storage::CursorEncodingStorage;
use crate::storage::EventSendingRegistryStorage;
use crate::storage::InMemoryRegistryStorage;
use crate::storage::ThreadSafeRegistryStorage;

/// Builds the event sink the registry storage reports mutations to.
///
/// The broker variant returns the receiving end of its bounded channel; the
/// caller hands it to whatever publishes onto the message bus. The other
/// variants are self-contained.
pub fn build_event_sink(
    settings: &RegistrySettings
) -> (Arc<dyn RegistryEventSink>, Option<mpsc::Receiver<RegistryEvent>>) {
    match settings.events.sink {
        EventSinkKind::Log => (Arc::new(LoggingEventSink), None),
        EventSinkKind::Broker => {
            let (sink, receiver) = BrokerEventSink::channel(settings.events.broker_channel_capacity);
            (Arc::new(sink), Some(receiver))
        }
        EventSinkKind::None => (Arc::new(NoopEventSink), None),
    }
}

/// Composes the descriptor storage stack described by the settings.
pub fn build_registry_storage(
    settings: &RegistrySettings,
    sink: Arc<dyn RegistryEventSink>,
) -> Arc<dyn AasRegistryStorage> {
    let core = match settings.storage.backend {
        StorageBackend::InMemory => InMemoryRegistryStorage::new(),
    };

    let mut storage: Arc<dyn AasRegistryStorage> =
        Arc::new(EventSendingRegistryStorage::new(core, sink));

    if settings.storage.clone_on_access {
        storage = Arc::new(CloningRegistryStorage::new(storage));
    }

    storage = Arc::new(CursorEncodingStorage::new(storage));

    if settings.storage.thread_safe {
        storage = Arc::new(ThreadSafeRegistryStorage::new(storage));
    }

    storage
}

/// Composes the discovery index stack described by the settings.
pub fn build_discovery_storage(settings: &RegistrySettings) -> Arc<dyn AasDiscoveryStorage> {
    let core = match settings.storage.backend {
        StorageBackend::InMemory => InMemoryDiscoveryStorage::new(),
    };

    Arc::new(CursorEncodingDiscoveryStorage::new(core))
}
