mod editor_state;
pub mod context;

pub use editor_state::{DragState, EditMode, Ripple, RIPPLE_DURATION};
pub use context::EditorContext;
