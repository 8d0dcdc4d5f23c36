use egui::{Key, KeyboardShortcut, Modifiers, Rect, TextureHandle, TextureId, TextureOptions};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::SurfaceError;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::surface::{Surface, SurfaceHandle};
use crate::tools::{Tool, ToolKind, ToolStyle};

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_SHORTCUT_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Tool choice persisted across restarts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ToolSettings {
    pub kind: ToolKind,
    pub style: ToolStyle,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            kind: ToolKind::Brush,
            style: ToolStyle::default(),
        }
    }
}

/// Thin eframe shell around the editor.
///
/// Owns the surface, shows it as a texture and forwards pointer input,
/// tool choices and undo/redo requests to the [`Editor`].
pub struct PaintApp {
    surface: SurfaceHandle,
    editor: Editor,
    input: InputHandler,
    canvas_texture: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Result<Self, SurfaceError> {
        let mut app = Self::with_config(config)?;

        if let Some(storage) = cc.storage {
            if let Some(settings) = eframe::get_value::<ToolSettings>(storage, eframe::APP_KEY) {
                log::info!("Restoring tool settings: {:?}", settings.kind);
                app.editor.choose_tool(settings.kind.instantiate(settings.style));
            }
        }

        Ok(app)
    }

    /// Builds the shell without a window, e.g. for tests
    pub fn with_config(config: EditorConfig) -> Result<Self, SurfaceError> {
        let surface = Surface::shared(config.canvas_width, config.canvas_height)?;
        let mut editor = Editor::new(&config);
        editor.setup(&surface);
        let input = InputHandler::new(Rect::NOTHING, surface.read().size());

        Ok(Self {
            surface,
            editor,
            input,
            canvas_texture: None,
            uploaded_version: None,
        })
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    /// Switch tools, carrying the current style over to the new one
    pub fn select_tool(&mut self, kind: ToolKind) {
        let style = self
            .editor
            .current_tool()
            .map(|tool| *tool.style())
            .unwrap_or_default();
        self.editor.choose_tool(kind.instantiate(style));
    }

    pub fn tool_settings(&self) -> Option<ToolSettings> {
        self.editor.current_tool().map(|tool| ToolSettings {
            kind: tool.kind(),
            style: *tool.style(),
        })
    }

    pub fn undo(&mut self) {
        self.editor.undo();
    }

    pub fn redo(&mut self) {
        self.editor.redo();
    }

    /// Size of the canvas widget so one surface pixel maps to one screen pixel
    pub fn canvas_display_size(&self, ctx: &egui::Context) -> egui::Vec2 {
        let [width, height] = self.surface.read().size();
        egui::vec2(width as f32, height as f32) / ctx.pixels_per_point()
    }

    /// Forward this frame's pointer input over `canvas_rect` to the editor
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        let surface_size = self.surface.read().size();
        self.input.set_canvas_rect(canvas_rect, surface_size);
        for event in self.input.process_input(ctx) {
            self.editor.handle_input(event);
        }
    }

    /// Upload the surface if it changed since the last frame
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let surface = self.surface.read();
        let version = surface.version();
        let [width, height] = surface.size();
        let image = || {
            egui::ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                surface.pixels().as_raw(),
            )
        };

        let texture = match self.canvas_texture.take() {
            Some(mut texture) => {
                if self.uploaded_version != Some(version) {
                    texture.set(image(), TextureOptions::NEAREST);
                }
                texture
            }
            None => ctx.load_texture("canvas", image(), TextureOptions::NEAREST),
        };
        self.uploaded_version = Some(version);

        let id = texture.id();
        self.canvas_texture = Some(texture);
        id
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Check redo first: the plain undo shortcut would also match Shift+Z
        let redo = ctx.input_mut(|i| {
            i.consume_shortcut(&REDO_SHORTCUT) || i.consume_shortcut(&REDO_SHORTCUT_ALT)
        });
        let undo = ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT));

        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(settings) = self.tool_settings() {
            eframe::set_value(storage, eframe::APP_KEY, &settings);
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.editor.poll_restore();
        if self.editor.has_pending_restore() {
            ctx.request_repaint();
        }

        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_select_tool_keeps_style() {
        let mut app = PaintApp::with_config(EditorConfig::default()).unwrap();
        if let Some(tool) = app.editor_mut().current_tool_mut() {
            tool.style_mut().color = Color32::RED;
            tool.style_mut().width = 12.0;
        }

        app.select_tool(ToolKind::Ellipse);

        let settings = app.tool_settings().unwrap();
        assert_eq!(settings.kind, ToolKind::Ellipse);
        assert_eq!(settings.style.color, Color32::RED);
        assert_eq!(settings.style.width, 12.0);
    }

    #[test]
    fn test_shell_surface_matches_config() {
        let config = EditorConfig {
            canvas_width: 320,
            canvas_height: 240,
            ..EditorConfig::default()
        };
        let app = PaintApp::with_config(config).unwrap();
        assert_eq!(app.surface().read().size(), [320, 240]);
        assert!(app.editor().has_surface());
    }
}
