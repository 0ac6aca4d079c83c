use egui::{Color32, Response, Sense, Stroke, Ui, Vec2};
use crate::skill::Level;
use crate::state::Ripple;

const TRACK_COLOR: Color32 = Color32::from_gray(60);
const FILL_COLOR: Color32 = Color32::from_rgb(100, 181, 246);
const RIPPLE_RADIUS: f32 = 24.0;

/// The proportional fill showing a block's level
pub struct LevelBar {
    level: Level,
    size: Vec2,
    editable: bool,
    /// Ripple origin relative to the bar and its animation progress
    ripple: Option<(Vec2, f32)>,
}

impl LevelBar {
    pub fn new(level: Level, size: Vec2) -> Self {
        Self {
            level,
            size,
            editable: false,
            ripple: None,
        }
    }

    /// Whether the bar reacts to the pointer
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn ripple(mut self, ripple: Option<&Ripple>, now: f64) -> Self {
        self.ripple = ripple.map(|r| (r.origin, r.progress(now)));
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let sense = if self.editable {
            Sense::click_and_drag()
        } else {
            Sense::hover()
        };
        let (rect, mut response) = ui.allocate_exact_size(self.size, sense);
        if self.editable {
            response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            let rounding = rect.height() / 2.0;
            painter.rect_filled(rect, rounding, TRACK_COLOR);

            let mut fill = rect;
            fill.set_width(rect.width() * self.level.fill_fraction());
            if fill.width() > 0.0 {
                painter.rect_filled(fill, rounding, FILL_COLOR);
            }

            if let Some((origin, progress)) = self.ripple {
                let alpha = ((1.0 - progress) * 160.0) as u8;
                painter.circle_filled(
                    rect.min + origin,
                    RIPPLE_RADIUS * progress,
                    Color32::from_white_alpha(alpha),
                );
            }

            if self.editable {
                painter.rect_stroke(rect, rounding, Stroke::new(1.0, Color32::from_gray(120)));
            }
        }

        response
    }
}
