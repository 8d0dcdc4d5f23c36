use super::{Tool, ToolStyle};
use crate::drag::DragRect;
use crate::raster::Coverage;
use crate::surface::Surface;

/// Axis-aligned rectangle spanned by the drag, outlined or filled
#[derive(Debug, Clone, Default)]
pub struct RectangleTool {
    style: ToolStyle,
    drag: DragRect,
}

impl RectangleTool {
    pub fn new(style: ToolStyle) -> Self {
        Self {
            style,
            drag: DragRect::default(),
        }
    }
}

impl Tool for RectangleTool {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn configure(&mut self, drag: DragRect) {
        self.drag = drag;
    }

    fn render(&self, surface: &mut Surface) {
        // to_rect sorts the corners, so drag direction does not matter
        let rect = self.drag.to_rect();
        let mut coverage = Coverage::new(surface.width(), surface.height());
        if self.style.fill {
            coverage.add_filled_rect(rect);
        } else {
            coverage.add_rect_outline(rect, self.style.width);
        }
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
