use std::sync::Arc;

use anyhow::Result;
use eframe::egui;

use crate::data::client::{ApiConfig, MeteoriteClient};
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MeteoriteApp {
    pub state: AppState,
}

impl MeteoriteApp {
    /// Build the app and start the default listing.
    pub fn new(cc: &eframe::CreationContext<'_>, config: ApiConfig) -> Result<Self> {
        let client = MeteoriteClient::new(&config)?;
        let mut state = AppState::new(config, Arc::new(client), Some(cc.egui_ctx.clone()));
        state.default_load();
        Ok(Self { state })
    }
}

impl eframe::App for MeteoriteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: search form ----
        let event = egui::SidePanel::left("search_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &mut self.state))
            .inner;
        if let Some(event) = event {
            self.state.handle_event(event);
        }

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::results_table(ui, &self.state);
        });
    }
}
