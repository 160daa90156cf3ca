use eframe::egui::{self, Color32, Key, RichText, Ui};

use crate::data::query::CLASS_CHOICES;
use crate::state::{AppState, UiEvent};

// ---------------------------------------------------------------------------
// Left side panel – search form
// ---------------------------------------------------------------------------

/// Render the search form. Returns the event raised this frame, if any.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) -> Option<UiEvent> {
    let mut event = None;

    ui.heading("Search");
    ui.separator();

    ui.label("Name contains");
    let name_edit = ui.add(
        egui::TextEdit::singleline(&mut state.form.name_pattern)
            .hint_text("e.g. Allende")
            .desired_width(f32::INFINITY),
    );
    if name_edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
        event = Some(UiEvent::Submit);
    }
    ui.add_space(8.0);

    ui.strong("Class");
    for &choice in CLASS_CHOICES {
        let selected = state.form.class_choice.as_deref() == Some(choice);
        if ui.radio(selected, choice).clicked() {
            state.form.class_choice = Some(choice.to_string());
        }
    }
    ui.add_space(8.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(!state.loading, egui::Button::new("Search"))
            .clicked()
        {
            event = Some(UiEvent::Submit);
        }
        if ui.button("Reset").clicked() {
            event = Some(UiEvent::Reset);
        }
    });

    event
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row count and any error message.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Meteorite Landings");

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading…");
        } else {
            ui.label(format!("{} rows", state.rows.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
