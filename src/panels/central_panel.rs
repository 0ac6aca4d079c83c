use egui::{vec2, Color32, Label, Response, Sense, TextEdit, Ui, UiBuilder};
use crate::input::{ClickTarget, InputEvent, InputHandler};
use crate::skill::{BlockId, Level};
use crate::widgets::LevelBar;
use crate::SkillsApp;

const ROW_HEIGHT: f32 = 30.0;
const NAME_WIDTH: f32 = 160.0;
const LEVEL_BAR_SIZE: egui::Vec2 = vec2(160.0, 10.0);

/// The résumé content. Everything in this panel ends up in the PDF.
pub fn central_panel(app: &mut SkillsApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        app.set_content_rect(ui.max_rect());

        ui.heading("Curriculum Vitae");
        ui.separator();
        skills_section(app, ui);
    });
}

struct Row {
    id: BlockId,
    name: String,
    level: Level,
    selected: bool,
}

fn skills_section(app: &mut SkillsApp, ui: &mut Ui) {
    let editing = app.editor().is_editing();

    ui.horizontal(|ui| {
        ui.strong("Languages");

        let add = ui.button("➕").on_hover_text("Add a language");
        if add.clicked() {
            let pos = add.interact_pointer_pos().unwrap_or(add.rect.center());
            app.input_mut().push_click(ClickTarget::AddButton, pos);
        }

        if app.editor().is_edit_toggle_visible() {
            let toggle = ui.selectable_label(editing, "✏").on_hover_text("Edit languages");
            if toggle.clicked() {
                let pos = toggle.interact_pointer_pos().unwrap_or(toggle.rect.center());
                app.input_mut().push_click(ClickTarget::EditToggle, pos);
            }
        }
    });

    let editor = app.editor();
    let rows: Vec<Row> = editor
        .blocks()
        .iter()
        .map(|b| Row {
            id: b.id(),
            name: b.name.clone(),
            level: b.level,
            selected: editor.is_selected(b.id()),
        })
        .collect();
    let ripple = editor.ripple().copied();
    let placeholder = editor.settings().default_name.clone();
    let focus = app.editor_mut().take_focus_request();
    let now = ui.input(|i| i.time);

    let list = ui.vertical(|ui| {
        for row in rows {
            // The row's own click area goes in first so the controls on top of it win
            let (rect, row_response) =
                ui.allocate_exact_size(vec2(ui.available_width(), ROW_HEIGHT), Sense::click());
            let hovered = ui.rect_contains_pointer(rect);

            let fill = if row.selected {
                Color32::from_rgb(33, 150, 243).gamma_multiply(0.3)
            } else {
                Color32::TRANSPARENT
            };
            ui.painter().rect_filled(rect, 4.0, fill);

            ui.allocate_new_ui(UiBuilder::new().max_rect(rect.shrink(4.0)), |ui| {
                ui.horizontal_centered(|ui| {
                    if editing {
                        let focused = focus == Some(row.id);
                        name_field(ui, app.input_mut(), row.id, &row.name, &placeholder, focused);
                    } else {
                        ui.add_sized([NAME_WIDTH, ROW_HEIGHT - 8.0], Label::new(row.name.as_str()));
                    }

                    let bar = LevelBar::new(row.level, LEVEL_BAR_SIZE)
                        .editable(editing)
                        .ripple(ripple.as_ref().filter(|r| r.block == row.id), now)
                        .show(ui);
                    let pressed = ui.input(|i| i.pointer.primary_pressed());
                    if editing && pressed && bar.is_pointer_button_down_on() {
                        if let Some(pos) = bar.interact_pointer_pos() {
                            app.input_mut().push_pointer_down(row.id, bar.rect, pos, now);
                        }
                    }
                    // A click on the bar is also a click on its block
                    if bar.clicked() {
                        let pos = bar.interact_pointer_pos().unwrap_or(bar.rect.center());
                        app.input_mut().push_click(ClickTarget::Block(row.id), pos);
                    }

                    if row.selected || (editing && hovered) {
                        let delete = ui.small_button("×").on_hover_text("Remove");
                        if delete.clicked() {
                            let pos = delete.interact_pointer_pos().unwrap_or(delete.rect.center());
                            app.input_mut().push_click(ClickTarget::DeleteButton(row.id), pos);
                        }
                    }
                });
            });

            if row_response.clicked() {
                let pos = row_response.interact_pointer_pos().unwrap_or(rect.center());
                app.input_mut().push_click(ClickTarget::Block(row.id), pos);
            }
        }
    });
    app.input_mut().set_list_rect(list.response.rect);

    if app.editor().is_empty() {
        ui.weak("No languages yet. Use ➕ to add one.");
    }
}

/// Editable name of one block. A click on the field is also a click on its block.
fn name_field(
    ui: &mut Ui,
    input: &mut InputHandler,
    id: BlockId,
    name: &str,
    placeholder: &str,
    focused: bool,
) -> Response {
    let mut text = name.to_owned();
    let edit = ui.add(
        TextEdit::singleline(&mut text)
            .hint_text(placeholder)
            .desired_width(NAME_WIDTH),
    );
    if focused {
        edit.request_focus();
    }
    if edit.changed() {
        input.push(InputEvent::NameEdited { block: id, text });
    }
    if edit.lost_focus() {
        input.push(InputEvent::FocusLost { block: id });
    }
    if edit.clicked() {
        let pos = edit.interact_pointer_pos().unwrap_or(edit.rect.center());
        input.push_click(ClickTarget::Block(id), pos);
    }
    edit
}
