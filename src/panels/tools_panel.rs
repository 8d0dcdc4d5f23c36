use crate::PaintApp;
use crate::components::ToolButton;
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_kind = app.editor().current_tool().map(|tool| tool.kind());
            ui.horizontal_wrapped(|ui| {
                for kind in ToolKind::ALL {
                    let button = ToolButton::new(kind, active_kind == Some(kind));
                    if button.show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind.name());
                        app.select_tool(kind);
                    }
                }
            });
            ui.separator();

            // Style edits go straight onto the active tool instance
            if let Some(tool) = app.editor_mut().current_tool_mut() {
                ui.heading(format!("{} Options", tool.name()));
                let style = tool.style_mut();
                ui.horizontal(|ui| {
                    ui.label("Color:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut style.color,
                        egui::color_picker::Alpha::OnlyBlend,
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Width:");
                    ui.add(egui::Slider::new(&mut style.width, 1.0..=50.0));
                });
                ui.checkbox(&mut style.fill, "Fill shapes");
            } else {
                ui.label("No tool selected");
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().can_undo();
                let can_redo = app.editor().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            let editor = app.editor();
            ui.label(format!("Undo stack size: {}", editor.undo_len()));
            ui.label(format!("Redo stack size: {}", editor.redo_len()));
            ui.label(format!("State: {}", editor.state().name()));
        });
}
