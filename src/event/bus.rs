use std::cell::RefCell;
use crate::event::{EditorEvent, EventHandler};

/// A simple event bus for broadcasting editor events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: EditorEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

/// Writes every editor event to the log
#[derive(Debug, Default)]
pub struct LogHandler;

impl EventHandler for LogHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::BlockAdded { id, index } => {
                log::info!("Skill block {} added at position {}", id, index);
            }
            EditorEvent::BlockRemoved { id, reason } => {
                log::info!("Skill block {} removed ({:?})", id, reason);
            }
            EditorEvent::ModeChanged { old, new } => {
                log::info!("Edit mode: {:?} -> {:?}", old, new);
            }
            EditorEvent::SelectionChanged { old, new } => {
                log::debug!("Selection: {:?} -> {:?}", old, new);
            }
            EditorEvent::LevelChanged { id, old, new } => {
                log::debug!("Skill block {} level {} -> {}", id, old, new);
            }
            EditorEvent::DragStarted { id } => log::trace!("Drag started on {}", id),
            EditorEvent::DragEnded { id } => log::trace!("Drag ended on {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::BlockId;
    use std::sync::Arc;
    use parking_lot::Mutex;

    struct Recorder(Arc<Mutex<Vec<EditorEvent>>>);

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &EditorEvent) {
            self.0.lock().push(event.clone());
        }
    }

    #[test]
    fn test_emit_reaches_every_handler() {
        let bus = EventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(Box::new(Recorder(first.clone())));
        bus.subscribe(Box::new(Recorder(second.clone())));
        bus.subscribe(Box::new(LogHandler));
        assert_eq!(bus.handler_count(), 3);

        let id = BlockId::new();
        bus.emit(EditorEvent::DragStarted { id });

        assert_eq!(first.lock().as_slice(), &[EditorEvent::DragStarted { id }]);
        assert_eq!(second.lock().len(), 1);
    }
}
