use crate::state::EditorContext;
use super::{ClickTarget, InputEvent};

/// Routes an input event to the editor.
///
/// This is the only place UI interactions turn into editor operations.
pub fn route_event(event: &InputEvent, editor: &mut EditorContext) {
    match event {
        InputEvent::Clicked { target, location } => {
            // Page-wide handler first, so a block created by this very click
            // keeps its selection.
            editor.deselect_if_outside(location);
            match *target {
                ClickTarget::AddButton => {
                    editor.add_default_block();
                }
                ClickTarget::EditToggle => {
                    // The toggle is not offered for an empty list
                    if editor.is_edit_toggle_visible() {
                        editor.toggle_edit_mode();
                    }
                }
                ClickTarget::Block(id) => editor.select_block(id),
                // Does not count as a click on the block underneath
                ClickTarget::DeleteButton(id) => {
                    editor.delete_block(id);
                }
                ClickTarget::Background => {}
            }
        }
        InputEvent::PointerDown { block, control, location, time } => {
            editor.begin_drag(*block, *control, location.position, *time);
        }
        InputEvent::PointerMove { location } => {
            editor.drag_to(location.position);
        }
        InputEvent::PointerUp { .. } => editor.end_drag(),
        InputEvent::FocusLost { block } => {
            editor.cleanup_empty_on_focus_loss(*block);
        }
        InputEvent::NameEdited { block, text } => {
            editor.rename_block(*block, text.as_str());
        }
        InputEvent::Tick { time } => editor.expire_ripple(*time),
    }
}
