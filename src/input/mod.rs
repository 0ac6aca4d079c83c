use egui::{Context, Pos2, Rect};
use crate::skill::BlockId;

mod router;
pub use router::route_event;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the skills list container
    pub is_in_list: bool,
}

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    AddButton,
    EditToggle,
    Block(BlockId),
    DeleteButton(BlockId),
    /// Anything that is not one of the controls above
    Background,
}

/// Represents the interactions the skills editor reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A click (press and release) on a target
    Clicked {
        target: ClickTarget,
        location: InputLocation,
    },
    /// Primary button pressed on a block's level control
    PointerDown {
        block: BlockId,
        /// Screen rect of the level control
        control: Rect,
        location: InputLocation,
        /// Input time in seconds
        time: f64,
    },
    /// Pointer moved while the primary button is held, anywhere on the page
    PointerMove {
        location: InputLocation,
    },
    /// Primary button released, anywhere on the page
    PointerUp {
        location: InputLocation,
    },
    /// A block's name field lost keyboard focus
    FocusLost {
        block: BlockId,
    },
    /// A block's name field was edited
    NameEdited {
        block: BlockId,
        text: String,
    },
    /// Start of a frame
    Tick {
        time: f64,
    },
}

/// Collects the editor's input events for one frame.
///
/// Widgets report what happened to them through the `push_*` methods while
/// the UI is laid out; [`InputHandler::process_input`] then adds the
/// page-wide pointer events and hands everything over in order.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    list_rect: Option<Rect>,
    pending: Vec<InputEvent>,
    click_claimed: bool,
    primary_was_down: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the skills list rectangle
    pub fn set_list_rect(&mut self, rect: Rect) {
        self.list_rect = Some(rect);
    }

    /// Creates an InputLocation from a position
    pub fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_list: self.list_rect.is_some_and(|rect| rect.contains(pos)),
        }
    }

    /// Record a click on a widget
    pub fn push_click(&mut self, target: ClickTarget, pos: Pos2) {
        self.click_claimed = true;
        let location = self.make_location(pos);
        self.pending.push(InputEvent::Clicked { target, location });
    }

    /// Record a press on a level control
    pub fn push_pointer_down(&mut self, block: BlockId, control: Rect, pos: Pos2, time: f64) {
        let location = self.make_location(pos);
        self.pending.push(InputEvent::PointerDown { block, control, location, time });
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Process page-wide pointer input and return this frame's events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let click_claimed = std::mem::replace(&mut self.click_claimed, false);

        // Text typed this frame belongs to the mode it was typed in, so it is
        // applied before any header click that may leave edit mode.
        events.sort_by_key(|event| !matches!(event, InputEvent::NameEdited { .. }));

        ctx.input(|input| {
            events.insert(0, InputEvent::Tick { time: input.time });

            let pointer = &input.pointer;
            let latest = pointer.latest_pos();
            if let Some(pos) = latest {
                if pointer.primary_down() && Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                    });
                }
                if pointer.primary_clicked() && !click_claimed {
                    events.push(InputEvent::Clicked {
                        target: ClickTarget::Background,
                        location: self.make_location(pos),
                    });
                }
            }

            // A release can come together with PointerGone (touch end, button
            // let go outside the window), which leaves no latest position.
            let primary_down = pointer.primary_down();
            if pointer.primary_released() || (self.primary_was_down && !primary_down) {
                let pos = latest.or(self.last_pointer_pos).unwrap_or(Pos2::ZERO);
                events.push(InputEvent::PointerUp {
                    location: self.make_location(pos),
                });
            }
            self.primary_was_down = primary_down;
            if latest.is_some() {
                self.last_pointer_pos = latest;
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::Level;
    use crate::state::EditorContext;
    use egui::{pos2, vec2, Event, Modifiers, PointerButton, RawInput};

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    /// Runs one frame of raw input and routes whatever the handler reports.
    fn run_frame(
        ctx: &Context,
        handler: &mut InputHandler,
        editor: &mut EditorContext,
        time: f64,
        events: Vec<Event>,
    ) -> Vec<InputEvent> {
        let raw = RawInput { time: Some(time), events, ..Default::default() };
        let mut routed = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            for event in handler.process_input(ctx) {
                route_event(&event, editor);
                routed.push(event);
            }
        });
        routed
    }

    #[test]
    fn test_location_uses_list_rect() {
        let mut handler = InputHandler::new();
        assert!(!handler.make_location(pos2(10.0, 10.0)).is_in_list);

        handler.set_list_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)));
        assert!(handler.make_location(pos2(10.0, 10.0)).is_in_list);
        assert!(!handler.make_location(pos2(150.0, 10.0)).is_in_list);
    }

    #[test]
    fn test_pending_events_come_after_tick_in_order() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let block = BlockId::new();
        handler.push_click(ClickTarget::Block(block), pos2(1.0, 1.0));
        handler.push(InputEvent::FocusLost { block });

        let events = handler.process_input(&ctx);

        assert!(matches!(events[0], InputEvent::Tick { .. }));
        assert!(matches!(
            events[1],
            InputEvent::Clicked { target: ClickTarget::Block(id), .. } if id == block
        ));
        assert_eq!(events[2], InputEvent::FocusLost { block });
        assert!(handler.process_input(&ctx).iter().all(|e| matches!(e, InputEvent::Tick { .. })));
    }

    #[test]
    fn test_release_with_pointer_gone_ends_drag() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut editor = EditorContext::default();
        let a = editor.add_default_block();
        let control = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 10.0));

        handler.push_pointer_down(a, control, pos2(20.0, 5.0), 0.0);
        run_frame(&ctx, &mut handler, &mut editor, 0.0, vec![
            Event::PointerMoved(pos2(20.0, 5.0)),
            button(pos2(20.0, 5.0), true),
        ]);
        assert!(editor.drag().is_dragging());

        let routed = run_frame(&ctx, &mut handler, &mut editor, 0.1, vec![
            button(pos2(20.0, 5.0), false),
            Event::PointerGone,
        ]);
        assert!(routed.iter().any(|e| matches!(e, InputEvent::PointerUp { .. })));
        assert!(!editor.drag().is_dragging());

        // A later press elsewhere on the page must not move the old block's level
        let level = editor.block(a).map(|b| b.level);
        run_frame(&ctx, &mut handler, &mut editor, 1.0, vec![
            Event::PointerMoved(pos2(500.0, 400.0)),
            button(pos2(500.0, 400.0), true),
        ]);
        run_frame(&ctx, &mut handler, &mut editor, 1.1, vec![Event::PointerMoved(pos2(140.0, 5.0))]);
        assert_eq!(editor.block(a).map(|b| b.level), level);
    }

    #[test]
    fn test_plain_release_reports_single_pointer_up() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut editor = EditorContext::default();

        run_frame(&ctx, &mut handler, &mut editor, 0.0, vec![
            Event::PointerMoved(pos2(30.0, 30.0)),
            button(pos2(30.0, 30.0), true),
        ]);
        let routed = run_frame(&ctx, &mut handler, &mut editor, 0.1, vec![button(pos2(30.0, 30.0), false)]);

        let ups = routed.iter().filter(|e| matches!(e, InputEvent::PointerUp { .. })).count();
        assert_eq!(ups, 1);
    }

    #[test]
    fn test_name_edit_applies_before_toggle_in_same_frame() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let mut editor = EditorContext::default();
        let a = editor.add_block("", Level::new(2));
        assert!(editor.is_editing());

        // Header widgets report before the list does
        handler.push_click(ClickTarget::EditToggle, pos2(5.0, 5.0));
        handler.push(InputEvent::NameEdited { block: a, text: "French".to_owned() });
        handler.push(InputEvent::FocusLost { block: a });

        let events = handler.process_input(&ctx);
        assert_eq!(events[1], InputEvent::NameEdited { block: a, text: "French".to_owned() });
        for event in &events {
            route_event(event, &mut editor);
        }

        assert!(!editor.is_editing());
        assert_eq!(editor.block(a).map(|b| b.name.as_str()), Some("French"));
    }
}
