//! Event types for engine change notifications.
//!
//! A host view registers an observer to re-render changed cells without
//! polling the store. The collector exists for tests.

use crate::address::Address;
use crate::cell::CellContent;

/// Events emitted by the engine after a mutation is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A cell's stored state changed (edit, style toggle, clear, or a cell
    /// restored by undo/redo).
    CellChanged(CellChangedEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellChangedEvent {
    pub address: Address,
    /// Content after the change was applied.
    pub content: CellContent,
}

/// Callback type for receiving engine events.
pub type EventCallback = Box<dyn FnMut(&EngineEvent)>;

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<EngineEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only CellChanged events.
    pub fn cell_changed(&self) -> Vec<&CellChangedEvent> {
        self.events
            .iter()
            .map(|e| match e {
                EngineEvent::CellChanged(c) => c,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_collector_accumulates() {
        let mut collector = EventCollector::new();
        assert!(collector.is_empty());

        collector.push(EngineEvent::CellChanged(CellChangedEvent {
            address: Address::new(0, 0),
            content: CellContent::Text("x".to_string()),
        }));
        collector.push(EngineEvent::CellChanged(CellChangedEvent {
            address: Address::new(1, 0),
            content: CellContent::Empty,
        }));

        assert_eq!(collector.len(), 2);
        assert_eq!(collector.cell_changed().len(), 2);
        assert_eq!(collector.cell_changed()[1].address, Address::new(1, 0));

        collector.clear();
        assert!(collector.is_empty());
    }
}
