//! The skills editor: the single owner of the block list and of every piece
//! of interaction state (edit mode, selection, drag latch, ripple, pending
//! focus).
//!
//! All mutations go through the methods below. Operations that are gated on
//! edit mode quietly do nothing when the mode does not allow them; none of
//! them can fail.
//!
//! # Example
//!
//! ```rust
//! use resume_skills::state::{EditorContext, EditMode};
//!
//! let mut editor = EditorContext::default();
//! let id = editor.add_default_block();
//!
//! assert_eq!(editor.mode(), EditMode::Editing);
//! assert_eq!(editor.selected(), Some(id));
//! assert!(editor.is_edit_toggle_visible());
//! ```
use crate::event::{EditorEvent, EventBus, RemovalReason};
use crate::input::InputLocation;
use crate::settings::EditorSettings;
use crate::skill::{BlockId, Level, SkillBlock};
use eframe::egui::{Pos2, Rect};
use super::{DragState, EditMode, Ripple};

#[derive(Debug)]
pub struct EditorContext {
    blocks: Vec<SkillBlock>,
    mode: EditMode,
    selected: Option<BlockId>,
    drag: DragState,
    ripple: Option<Ripple>,
    /// Name field that should receive keyboard focus on the next frame
    focus_request: Option<BlockId>,
    settings: EditorSettings,
    /// The event bus for broadcasting editor events
    pub event_bus: EventBus,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorContext {
    /// Creates an empty editor in viewing mode.
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            blocks: Vec::new(),
            mode: EditMode::Viewing,
            selected: None,
            drag: DragState::Idle,
            ripple: None,
            focus_request: None,
            settings,
            event_bus: EventBus::new(),
        }
    }

    pub fn blocks(&self) -> &[SkillBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&SkillBlock> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn is_selected(&self, id: BlockId) -> bool {
        self.selected == Some(id)
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn ripple(&self) -> Option<&Ripple> {
        self.ripple.as_ref()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The edit toggle is only offered while there is something to edit.
    pub fn is_edit_toggle_visible(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Hands out the pending focus request, if any.
    pub fn take_focus_request(&mut self) -> Option<BlockId> {
        self.focus_request.take()
    }

    /// Adds a block with the configured default name and level.
    pub fn add_default_block(&mut self) -> BlockId {
        let name = self.settings.default_name.clone();
        let level = Level::new(self.settings.default_level);
        self.add_block(name, level)
    }

    /// Appends a block, selects it, switches to edit mode if needed and asks
    /// for its name field to be focused.
    pub fn add_block(&mut self, name: impl Into<String>, level: Level) -> BlockId {
        let block = SkillBlock::new(name, level);
        let id = block.id();
        self.blocks.push(block);
        self.event_bus.emit(EditorEvent::BlockAdded {
            id,
            index: self.blocks.len() - 1,
        });

        if !self.mode.is_editing() {
            self.toggle_edit_mode();
        }
        self.set_selection(Some(id));
        self.focus_request = Some(id);
        id
    }

    /// Flips between viewing and editing.
    ///
    /// Leaving edit mode ends any drag, clears the selection and drops every
    /// block whose name is blank.
    pub fn toggle_edit_mode(&mut self) {
        let old = self.mode;
        self.mode = old.toggled();
        self.event_bus.emit(EditorEvent::ModeChanged { old, new: self.mode });

        if !self.mode.is_editing() {
            self.end_drag();
            self.set_selection(None);
            self.cleanup_empty_on_mode_exit();
        }
    }

    /// Removes every block with a blank name. Returns how many were removed.
    pub fn cleanup_empty_on_mode_exit(&mut self) -> usize {
        let blank: Vec<BlockId> = self
            .blocks
            .iter()
            .filter(|b| b.has_blank_name())
            .map(|b| b.id())
            .collect();
        for id in &blank {
            self.remove_block(*id, RemovalReason::EmptyOnModeExit);
        }
        blank.len()
    }

    /// Removes a block whose name field lost focus blank while not editing.
    /// Returns true if the block was removed.
    pub fn cleanup_empty_on_focus_loss(&mut self, id: BlockId) -> bool {
        if self.mode.is_editing() {
            return false;
        }
        match self.block(id) {
            Some(block) if block.has_blank_name() => {
                self.remove_block(id, RemovalReason::EmptyOnFocusLoss);
                true
            }
            _ => false,
        }
    }

    /// Replaces a block's name. Names are only editable in edit mode.
    pub fn rename_block(&mut self, id: BlockId, name: impl Into<String>) -> bool {
        if !self.mode.is_editing() {
            return false;
        }
        match self.blocks.iter_mut().find(|b| b.id() == id) {
            Some(block) => {
                block.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Sets a block's level from a pointer offset inside its level control.
    ///
    /// Returns the stored level, or `None` when not editing or the block is
    /// gone.
    pub fn set_level(&mut self, id: BlockId, offset_x: f32, control_width: f32) -> Option<Level> {
        if !self.mode.is_editing() {
            return None;
        }
        let block = self.blocks.iter_mut().find(|b| b.id() == id)?;
        let new = Level::from_pointer(offset_x, control_width);
        let old = block.level;
        if old != new {
            block.level = new;
            self.event_bus.emit(EditorEvent::LevelChanged { id, old, new });
        }
        Some(new)
    }

    /// Press on a block's level control: latches the drag, starts the ripple
    /// and applies the level under the pointer right away.
    pub fn begin_drag(&mut self, id: BlockId, control: Rect, pointer: Pos2, now: f64) {
        if !self.mode.is_editing() || self.block(id).is_none() {
            return;
        }
        self.drag = DragState::Dragging { block: id, control };
        self.ripple = Some(Ripple::new(id, control, pointer, now));
        self.event_bus.emit(EditorEvent::DragStarted { id });
        self.set_level(id, pointer.x - control.min.x, control.width());
    }

    /// Pointer moved anywhere on the page. Only the latched block follows it.
    pub fn drag_to(&mut self, pointer: Pos2) -> Option<Level> {
        if !self.mode.is_editing() {
            return None;
        }
        match self.drag {
            DragState::Dragging { block, control } => {
                self.set_level(block, pointer.x - control.min.x, control.width())
            }
            DragState::Idle => None,
        }
    }

    /// Pointer released anywhere on the page.
    pub fn end_drag(&mut self) {
        if let DragState::Dragging { block, .. } = self.drag {
            self.drag = DragState::Idle;
            self.event_bus.emit(EditorEvent::DragEnded { id: block });
        }
    }

    /// Clears the ripple once its animation has run.
    pub fn expire_ripple(&mut self, now: f64) {
        if self.ripple.is_some_and(|r| r.is_finished(now)) {
            self.ripple = None;
        }
    }

    /// Removes a block in any mode. The selection is cleared whichever block
    /// was selected.
    pub fn delete_block(&mut self, id: BlockId) -> bool {
        if self.block(id).is_none() {
            return false;
        }
        self.remove_block(id, RemovalReason::Deleted);
        self.set_selection(None);
        true
    }

    /// Click on a block in edit mode: toggles its selection, deselecting any
    /// other block first.
    pub fn select_block(&mut self, id: BlockId) {
        if !self.mode.is_editing() || self.block(id).is_none() {
            return;
        }
        let new = if self.selected == Some(id) { None } else { Some(id) };
        self.set_selection(new);
    }

    /// Clears the selection when an interaction happened outside the list.
    pub fn deselect_if_outside(&mut self, location: &InputLocation) {
        if self.selected.is_some() && !location.is_in_list {
            self.set_selection(None);
        }
    }

    fn set_selection(&mut self, new: Option<BlockId>) {
        let old = self.selected;
        if old != new {
            self.selected = new;
            self.event_bus.emit(EditorEvent::SelectionChanged { old, new });
        }
    }

    fn remove_block(&mut self, id: BlockId, reason: RemovalReason) {
        let Some(index) = self.blocks.iter().position(|b| b.id() == id) else {
            return;
        };
        self.blocks.remove(index);

        if self.drag.dragged_block() == Some(id) {
            self.end_drag();
        }
        if self.ripple.is_some_and(|r| r.block == id) {
            self.ripple = None;
        }
        if self.focus_request == Some(id) {
            self.focus_request = None;
        }
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        self.event_bus.emit(EditorEvent::BlockRemoved { id, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn control() -> Rect {
        Rect::from_min_size(pos2(100.0, 20.0), vec2(160.0, 10.0))
    }

    fn outside() -> InputLocation {
        InputLocation { position: pos2(5.0, 5.0), is_in_list: false }
    }

    #[test]
    fn test_add_enters_edit_mode_and_selects() {
        let mut editor = EditorContext::default();
        assert!(!editor.is_edit_toggle_visible());

        let id = editor.add_default_block();

        assert_eq!(editor.len(), 1);
        assert!(editor.is_editing());
        assert!(editor.is_selected(id));
        assert!(editor.is_edit_toggle_visible());
        assert_eq!(editor.block(id).unwrap().name, "New Language");
        assert_eq!(editor.block(id).unwrap().level, Level::MIN);
        assert_eq!(editor.take_focus_request(), Some(id));
        assert_eq!(editor.take_focus_request(), None);
    }

    #[test]
    fn test_adding_moves_selection_to_new_block() {
        let mut editor = EditorContext::default();
        let first = editor.add_default_block();
        let second = editor.add_block("Rust", Level::new(6));

        assert!(!editor.is_selected(first));
        assert!(editor.is_selected(second));
        assert_eq!(editor.blocks()[1].name, "Rust");
    }

    #[test]
    fn test_mode_exit_clears_selection_and_blank_blocks() {
        let mut editor = EditorContext::default();
        let keep = editor.add_block("English", Level::new(8));
        let blank = editor.add_default_block();
        editor.rename_block(blank, "   ");

        editor.toggle_edit_mode();

        assert_eq!(editor.mode(), EditMode::Viewing);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.len(), 1);
        assert!(editor.block(keep).is_some());
        assert!(editor.block(blank).is_none());
    }

    #[test]
    fn test_rename_only_in_edit_mode() {
        let mut editor = EditorContext::default();
        let id = editor.add_default_block();
        assert!(editor.rename_block(id, "German"));
        editor.toggle_edit_mode();
        assert!(!editor.rename_block(id, "French"));
        assert_eq!(editor.block(id).unwrap().name, "German");
    }

    #[test]
    fn test_selection_toggles_and_is_exclusive() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        let b = editor.add_block("B", Level::MIN);

        editor.select_block(a);
        assert_eq!(editor.selected(), Some(a));
        editor.select_block(b);
        assert_eq!(editor.selected(), Some(b));
        editor.select_block(b);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_selection_ignored_while_viewing() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        editor.toggle_edit_mode();
        editor.select_block(a);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_delete_clears_selection_unconditionally() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        let b = editor.add_block("B", Level::MIN);
        assert!(editor.is_selected(b));

        assert!(editor.delete_block(a));
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.len(), 1);
        assert!(!editor.delete_block(a));
    }

    #[test]
    fn test_delete_last_block_hides_toggle() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        editor.toggle_edit_mode();
        assert!(editor.delete_block(a));
        assert!(!editor.is_edit_toggle_visible());
    }

    #[test]
    fn test_set_level_only_in_edit_mode() {
        let mut editor = EditorContext::default();
        let id = editor.add_block("A", Level::MIN);
        assert_eq!(editor.set_level(id, 80.0, 160.0), Some(Level::new(4)));

        editor.toggle_edit_mode();
        assert_eq!(editor.set_level(id, 160.0, 160.0), None);
        assert_eq!(editor.block(id).unwrap().level, Level::new(4));
    }

    #[test]
    fn test_drag_updates_only_latched_block() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        let b = editor.add_block("B", Level::new(2));

        editor.begin_drag(a, control(), pos2(120.0, 25.0), 0.0);
        assert_eq!(editor.block(a).unwrap().level, Level::new(1));
        assert!(editor.ripple().is_some());

        editor.drag_to(pos2(220.0, 400.0));
        assert_eq!(editor.block(a).unwrap().level, Level::new(6));
        assert_eq!(editor.block(b).unwrap().level, Level::new(2));

        editor.end_drag();
        assert_eq!(editor.drag(), DragState::Idle);
        assert_eq!(editor.drag_to(pos2(260.0, 25.0)), None);
        assert_eq!(editor.block(a).unwrap().level, Level::new(6));
    }

    #[test]
    fn test_drag_past_control_clamps() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::new(3));
        editor.begin_drag(a, control(), pos2(150.0, 25.0), 0.0);
        assert_eq!(editor.drag_to(pos2(-400.0, 25.0)), Some(Level::MIN));
        assert_eq!(editor.drag_to(pos2(900.0, 25.0)), Some(Level::MAX));
    }

    #[test]
    fn test_drag_ignored_while_viewing() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::new(3));
        editor.toggle_edit_mode();
        editor.begin_drag(a, control(), pos2(260.0, 25.0), 0.0);
        assert_eq!(editor.drag(), DragState::Idle);
        assert!(editor.ripple().is_none());
        assert_eq!(editor.block(a).unwrap().level, Level::new(3));
    }

    #[test]
    fn test_mode_exit_releases_drag() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        editor.begin_drag(a, control(), pos2(100.0, 25.0), 0.0);
        editor.toggle_edit_mode();
        assert_eq!(editor.drag(), DragState::Idle);
    }

    #[test]
    fn test_deleting_dragged_block_releases_drag() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        editor.begin_drag(a, control(), pos2(100.0, 25.0), 0.0);
        editor.delete_block(a);
        assert_eq!(editor.drag(), DragState::Idle);
        assert!(editor.ripple().is_none());
    }

    #[test]
    fn test_ripple_expires() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        editor.begin_drag(a, control(), pos2(100.0, 25.0), 1.0);
        editor.expire_ripple(1.2);
        assert!(editor.ripple().is_some());
        editor.expire_ripple(2.0);
        assert!(editor.ripple().is_none());
        // The drag itself is unaffected by the ripple going away
        assert!(editor.drag().is_dragging());
    }

    #[test]
    fn test_focus_loss_keeps_named_blocks() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);
        let b = editor.add_block("B", Level::MIN);

        // Still editing: nothing happens even though the name is blank
        editor.rename_block(a, "");
        assert!(!editor.cleanup_empty_on_focus_loss(a));

        // Rename back so the mode exit keeps it, then blank it behind the editor's back
        editor.rename_block(a, "A");
        editor.toggle_edit_mode();
        assert!(!editor.cleanup_empty_on_focus_loss(b));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_focus_loss_on_blank_block() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("", Level::MIN);
        // Leave edit mode without the bulk pass seeing it
        editor.mode = EditMode::Viewing;
        assert!(editor.cleanup_empty_on_focus_loss(a));
        assert!(editor.is_empty());
        assert!(!editor.is_edit_toggle_visible());
    }

    #[test]
    fn test_deselect_if_outside() {
        let mut editor = EditorContext::default();
        let a = editor.add_block("A", Level::MIN);

        let inside = InputLocation { position: pos2(120.0, 25.0), is_in_list: true };
        editor.deselect_if_outside(&inside);
        assert!(editor.is_selected(a));

        editor.deselect_if_outside(&outside());
        assert_eq!(editor.selected(), None);
    }
}
