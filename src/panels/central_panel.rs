use egui::{Color32, Rect, pos2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = app.canvas_display_size(ctx);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let canvas_rect = response.rect;

            // Input first so this frame already shows the preview
            app.handle_canvas_input(ctx, canvas_rect);
            let texture = app.canvas_texture(ctx);

            // Transparent surface pixels show the paper underneath
            painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
            painter.image(
                texture,
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        });
    });
}
