//! The state machines driving the skills editor.
//!
//! Two small machines live side by side. [`EditMode`] decides what the list
//! accepts from the user; [`DragState`] is the latch that tracks a pointer
//! drag on one block's level control.
//!
//! # Edit mode
//!
//! ```text
//!  ┌──────────┐   toggle / add   ┌──────────┐
//!  │          ├──────────────────►          │
//!  │ Viewing  │                  │ Editing  │
//!  │          ◄──────────────────┤          │
//!  └──────────┘      toggle      └──────────┘
//!                (clears selection,
//!                 drops blank blocks)
//! ```
//!
//! # Drag
//!
//! ```text
//!  ┌──────┐  press on level control  ┌──────────────────┐
//!  │ Idle ├──────────────────────────► Dragging(block)  │
//!  │      ◄──────────────────────────┤                  │
//!  └──────┘  release / mode exit /   └──────────────────┘
//!            block deleted
//! ```
use crate::skill::BlockId;
use eframe::egui::{Pos2, Rect, Vec2};

/// How long the ripple animation on a level control lasts, in seconds.
pub const RIPPLE_DURATION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Names are read-only, level controls are inert, clicks do nothing.
    #[default]
    Viewing,
    /// Names are editable, levels follow the pointer, clicks select.
    Editing,
}

impl EditMode {
    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Viewing => Self::Editing,
            Self::Editing => Self::Viewing,
        }
    }
}

/// Latch for an in-progress level drag.
///
/// Pointer moves are delivered to the editor for the whole page; only the
/// block captured here reacts to them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        block: BlockId,
        /// Screen rect of the level control at press time
        control: Rect,
    },
}

impl DragState {
    pub fn dragged_block(&self) -> Option<BlockId> {
        match self {
            Self::Dragging { block, .. } => Some(*block),
            Self::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Cosmetic radial effect shown where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub block: BlockId,
    /// Position relative to the level control's top-left corner
    pub origin: Vec2,
    /// Time the ripple started, in seconds
    pub started_at: f64,
}

impl Ripple {
    pub fn new(block: BlockId, control: Rect, pointer: Pos2, now: f64) -> Self {
        Self {
            block,
            origin: pointer - control.min,
            started_at: now,
        }
    }

    /// Animation progress in `0.0..=1.0`.
    pub fn progress(&self, now: f64) -> f32 {
        ((now - self.started_at) / RIPPLE_DURATION).clamp(0.0, 1.0) as f32
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= RIPPLE_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn test_mode_toggle() {
        assert_eq!(EditMode::default(), EditMode::Viewing);
        assert_eq!(EditMode::Viewing.toggled(), EditMode::Editing);
        assert_eq!(EditMode::Editing.toggled(), EditMode::Viewing);
        assert!(EditMode::Editing.is_editing());
    }

    #[test]
    fn test_ripple_lifecycle() {
        let control = Rect::from_min_size(pos2(100.0, 50.0), vec2(160.0, 12.0));
        let ripple = Ripple::new(BlockId::new(), control, pos2(140.0, 56.0), 10.0);

        assert_eq!(ripple.origin, vec2(40.0, 6.0));
        assert_eq!(ripple.progress(10.0), 0.0);
        assert!((ripple.progress(10.3) - 0.5).abs() < 1e-4);
        assert!(!ripple.is_finished(10.5));
        assert!(ripple.is_finished(10.7));
        assert_eq!(ripple.progress(20.0), 1.0);
    }

    #[test]
    fn test_drag_state_accessors() {
        let block = BlockId::new();
        let dragging = DragState::Dragging {
            block,
            control: Rect::from_min_size(pos2(0.0, 0.0), vec2(80.0, 10.0)),
        };
        assert!(dragging.is_dragging());
        assert_eq!(dragging.dragged_block(), Some(block));
        assert_eq!(DragState::Idle.dragged_block(), None);
    }
}
