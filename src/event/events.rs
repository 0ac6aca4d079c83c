use crate::skill::{BlockId, Level};
use crate::state::EditMode;

/// Why a block left the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Removed through its delete control
    Deleted,
    /// Name was blank when edit mode was switched off
    EmptyOnModeExit,
    /// Name was blank when its field lost focus outside edit mode
    EmptyOnFocusLoss,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    BlockAdded {
        id: BlockId,
        index: usize,
    },
    BlockRemoved {
        id: BlockId,
        reason: RemovalReason,
    },
    ModeChanged {
        old: EditMode,
        new: EditMode,
    },
    SelectionChanged {
        old: Option<BlockId>,
        new: Option<BlockId>,
    },
    LevelChanged {
        id: BlockId,
        old: Level,
        new: Level,
    },
    DragStarted {
        id: BlockId,
    },
    DragEnded {
        id: BlockId,
    },
}
