//! Generation events for decoupled communication with downstream consumers.
//!
//! The generator pushes one event per completed pass. Consumers either
//! subscribe an observer (called once per pass) or poll the queue.

/// Events the generator emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DungeonEvent {
    /// A generation pass finished; fired exactly once per `generate()` call
    Generated {
        generation: u64,
        room_count: usize,
    },
}

/// Simple event queue - events are pushed during generation, drained by consumers
#[derive(Default)]
pub struct EventQueue {
    events: Vec<DungeonEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: DungeonEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = DungeonEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Zero-argument completion observers
#[derive(Default)]
pub struct CompletionObservers {
    observers: Vec<Box<dyn FnMut()>>,
}

impl CompletionObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Call every observer once
    pub fn notify(&mut self) {
        for observer in &mut self.observers {
            observer();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = EventQueue::new();
        queue.push(DungeonEvent::Generated { generation: 1, room_count: 3 });
        queue.push(DungeonEvent::Generated { generation: 2, room_count: 5 });
        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1], DungeonEvent::Generated { generation: 2, room_count: 5 });
        assert!(queue.is_empty());
    }

    #[test]
    fn test_observers_called_once_per_notify() {
        let calls = Rc::new(Cell::new(0));
        let mut observers = CompletionObservers::new();
        let counter = Rc::clone(&calls);
        observers.subscribe(move || counter.set(counter.get() + 1));

        observers.notify();
        observers.notify();
        assert_eq!(calls.get(), 2);
    }
}
