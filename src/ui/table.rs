use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::MeteoriteRecord;
use crate::state::AppState;

pub const COLUMN_HEADERS: [&str; 5] = ["Name", "Class", "Mass (g)", "Fall", "Geolocation"];

// ---------------------------------------------------------------------------
// Record → display row
// ---------------------------------------------------------------------------

/// One formatted table row, cells in [`COLUMN_HEADERS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub class: String,
    pub mass: String,
    pub fall: String,
    pub location: String,
}

impl TableRow {
    pub fn from_record(record: &MeteoriteRecord) -> Self {
        let mass = record.mass.map(|m| format!("{m:.2}")).unwrap_or_default();
        let location = match &record.geolocation {
            Some(geo) => geo.to_string(),
            None => "unknown".to_string(),
        };
        Self {
            name: record.name.clone(),
            class: record.recclass.clone(),
            mass,
            fall: record.fall.clone(),
            location,
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [&self.name, &self.class, &self.mass, &self.fall, &self.location]
    }
}

/// Format every record, preserving response order.
pub fn render_rows(records: &[MeteoriteRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from_record).collect()
}

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the description heading and the results table.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    ui.heading(state.description.as_str());
    ui.add_space(6.0);

    if state.rows.is_empty() {
        if state.loading {
            ui.spinner();
        }
        return;
    }

    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(180.0).at_least(80.0))
        .column(Column::initial(120.0).at_least(60.0))
        .column(Column::initial(120.0).at_least(60.0))
        .column(Column::initial(70.0).at_least(50.0))
        .column(Column::remainder().at_least(120.0))
        .header(22.0, |mut header| {
            for title in COLUMN_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, state.rows.len(), |mut row| {
                let r = &state.rows[row.index()];
                for (i, cell) in r.cells().into_iter().enumerate() {
                    row.col(|ui: &mut Ui| {
                        if i == 1 {
                            let color = state.class_colors.color_for(cell);
                            ui.label(RichText::new(cell).color(color));
                        } else {
                            ui.label(cell);
                        }
                    });
                }
            });
        });
}
