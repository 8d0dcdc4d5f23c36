#![warn(clippy::all, rust_2018_idioms)]

use raster_paint::{EditorConfig, PaintApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = EditorConfig::from_env();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Raster Paint",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)?))),
    )
}
