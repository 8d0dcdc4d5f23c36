use egui::Pos2;

use super::{StrokeHelper, Tool, ToolStyle};
use crate::drag::DragRect;
use crate::raster::Coverage;
use crate::surface::Surface;

/// The brush tool for freehand drawing
#[derive(Debug, Clone, Default)]
pub struct BrushTool {
    style: ToolStyle,
    path: StrokeHelper,
}

impl BrushTool {
    pub fn new(style: ToolStyle) -> Self {
        Self {
            style,
            path: StrokeHelper::default(),
        }
    }

    pub fn points(&self) -> &[Pos2] {
        self.path.points()
    }
}

impl Tool for BrushTool {
    fn name(&self) -> &'static str {
        "Brush"
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
        if coverage.is_empty() {
            return;
        }
        coverage.paint(surface.pixels_mut(), self.style.color);
    }

    fn style(&self) -> &ToolStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ToolStyle {
        &mut self.style
    }
}
