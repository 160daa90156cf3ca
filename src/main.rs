mod app;
mod color;
mod data;
mod state;
mod ui;

use app::MeteoriteApp;
use data::client::ApiConfig;
use eframe::egui;

type AppError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Meteorite Landings",
        options,
        Box::new(|cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, AppError> {
            let app = MeteoriteApp::new(cc, ApiConfig::default())?;
            Ok(Box::new(app))
        }),
    )
}
