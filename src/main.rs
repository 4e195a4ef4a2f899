use anyhow::anyhow;
use easel::app::SketchApp;
use easel::settings::AppSettings;
use easel::{logging, settings};
use eframe::egui;
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let (app_settings, settings_error) = match settings::load() {
        Ok(loaded) => (loaded, None),
        Err(err) => (AppSettings::default(), Some(err)),
    };
    logging::init(app_settings.debug_logging);
    if let Some(err) = settings_error {
        warn!("settings unavailable, using defaults: {err:#}");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            app_settings.window_width as f32,
            app_settings.window_height as f32,
        ]),
        ..Default::default()
    };

    eframe::run_native(
        "Easel",
        native_options,
        Box::new(move |_cc| Box::new(SketchApp::new(app_settings))),
    )
    .map_err(|err| anyhow!("event loop terminated with error: {err}"))
}
