//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receives domain events from the core services.
///
/// - `emit()` must not block (no network calls)
/// - Implementations queue events for async processing
/// - Emission is best-effort and never fails a domain operation
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Writes every event to the `log` facade at info level.
#[derive(Clone, Default)]
pub struct LoggingEventSink;

impl DomainEventSink for LoggingEventSink {
    fn emit(&self, event: DomainEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => log::info!("domain event: {}", json),
            Err(e) => log::warn!("domain event {:?} could not be serialized: {}", event, e),
        }
    }
}

/// Keeps emitted events in memory, in emission order.
#[derive(Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainEventSink for RecordingEventSink {
    fn emit(&self, event: DomainEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(e) => log::error!("event recorder lock poisoned, dropping event: {}", e),
        }
    }
}
