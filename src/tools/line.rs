use super::{Tool, ToolStyle};
use crate::drag::DragRect;
use crate::raster::Coverage;
use crate::surface::Surface;

/// Straight segment from the drag start to the drag end
#[derive(Debug, Clone, Default)]
pub struct LineTool {
    style: ToolStyle,
    drag: DragRect,
}

impl LineTool {
    pub fn new(style: ToolStyle) -> Self {
        Self {
            style,
            drag: DragRect::default(),
        }
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn configure(&mut self, drag: DragRect) {
        self.drag = drag;
    }

    fn render(&self, surface: &mut Surface) {
        let mut coverage = Coverage::new(surface.width(), surface.height());
        coverage.add_segment(self.drag.start(), self.drag.end(), self.style.width);
        if !coverage.is_empty() {
            coverage.paint(surface.pixels_mut(), self.style.color);
        }
    }

    fn style(&self) -> &ToolStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ToolStyle {
        &mut self.style
    }
}
