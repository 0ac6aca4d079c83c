mod bus;
mod events;

pub use bus::{EventBus, LogHandler};
pub use events::{EditorEvent, RemovalReason};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}
