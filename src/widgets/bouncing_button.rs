use egui::{Button, Rect, Response, Sense, Ui, Vec2};

/// Pixels moved per frame along each axis
pub const BOUNCE_SPEED: f32 = 10.0;

/// A button that wanders around its container while the pointer is over it,
/// bouncing off the container's edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BouncingButton {
    /// Top-left corner relative to the container; centered on first show
    offset: Option<Vec2>,
    velocity: Vec2,
    size: Vec2,
    moving: bool,
}

impl Default for BouncingButton {
    fn default() -> Self {
        Self::new(Vec2::new(140.0, 32.0))
    }
}

impl BouncingButton {
    pub fn new(size: Vec2) -> Self {
        Self {
            offset: None,
            velocity: Vec2::splat(BOUNCE_SPEED),
            size,
            moving: false,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn offset(&self) -> Option<Vec2> {
        self.offset
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Advances one frame inside a container of the given size.
    ///
    /// An axis reverses when the button touches either edge on that axis.
    pub fn step(&mut self, container: Vec2) {
        let offset = *self.offset.get_or_insert((container - self.size) / 2.0);
        let right = offset.x + self.size.x;
        let bottom = offset.y + self.size.y;

        if right >= container.x || offset.x <= 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if bottom >= container.y || offset.y <= 0.0 {
            self.velocity.y = -self.velocity.y;
        }

        let max = (container - self.size).max(Vec2::ZERO);
        self.offset = Some((offset + self.velocity).clamp(Vec2::ZERO, max));
    }

    /// Shows the container and the button. The container takes the full
    /// available width and `height`.
    pub fn show(&mut self, ui: &mut Ui, height: f32, text: &str, enabled: bool) -> Response {
        let (container, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());

        self.moving = ui.rect_contains_pointer(container);
        if self.moving {
            self.step(container.size());
            ui.ctx().request_repaint();
        }

        let offset = *self.offset.get_or_insert((container.size() - self.size) / 2.0);
        let rect = Rect::from_min_size(container.min + offset, self.size);
        ui.put(rect, Button::new(text).sense(if enabled { Sense::click() } else { Sense::hover() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_starts_centered_and_moves_diagonally() {
        let mut button = BouncingButton::new(vec2(100.0, 30.0));
        button.step(vec2(300.0, 130.0));
        assert_eq!(button.offset(), Some(vec2(110.0, 60.0)));
        assert_eq!(button.velocity(), vec2(10.0, 10.0));
    }

    #[test]
    fn test_bounces_off_edges() {
        let mut button = BouncingButton::new(vec2(100.0, 30.0));
        let container = vec2(300.0, 130.0);
        // Walk until the bottom edge is touched
        for _ in 0..5 {
            button.step(container);
        }
        assert_eq!(button.offset(), Some(vec2(150.0, 100.0)));
        button.step(container);
        assert_eq!(button.velocity(), vec2(10.0, -10.0));
        assert_eq!(button.offset(), Some(vec2(160.0, 90.0)));
    }

    #[test]
    fn test_never_leaves_container() {
        let mut button = BouncingButton::new(vec2(100.0, 30.0));
        let container = vec2(237.0, 91.0);
        for _ in 0..500 {
            button.step(container);
            let offset = button.offset().unwrap();
            assert!(offset.x >= 0.0 && offset.x + 100.0 <= container.x);
            assert!(offset.y >= 0.0 && offset.y + 30.0 <= container.y);
        }
    }
}
