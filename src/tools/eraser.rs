use egui::Pos2;

use super::{StrokeHelper, Tool, ToolStyle};
use crate::drag::DragRect;
use crate::raster::Coverage;
use crate::surface::Surface;

/// Freehand tool that clears pixels back to transparent.
///
/// Uses the brush footprint; the style's color and fill are ignored.
#[derive(Debug, Clone, Default)]
pub struct EraserTool {
    style: ToolStyle,
    path: StrokeHelper,
}

impl EraserTool {
    pub fn new(style: ToolStyle) -> Self {
        Self {
            style,
            path: StrokeHelper::default(),
        }
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn begin(&mut self, origin: Pos2) {
        self.path.begin(origin);
    }

    fn configure(&mut self, drag: DragRect) {
        self.path.follow(drag);
    }

    fn render(&self, surface: &mut Surface) {
        let mut coverage = Coverage::new(surface.width(), surface.height());
        coverage.add_polyline(self.path.points(), self.style.width);
        if !coverage.is_empty() {
            coverage.erase(surface.pixels_mut());
        }
    }

    fn style(&self) -> &ToolStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ToolStyle {
        &mut self.style
    }
}
