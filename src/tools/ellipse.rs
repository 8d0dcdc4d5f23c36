use super::{Tool, ToolStyle};
use crate::drag::DragRect;
use crate::raster::Coverage;
use crate::surface::Surface;

/// Ellipse inscribed in the drag rectangle
#[derive(Debug, Clone, Default)]
pub struct EllipseTool {
    style: ToolStyle,
    drag: DragRect,
}

impl EllipseTool {
    pub fn new(style: ToolStyle) -> Self {
        Self {
            style,
            drag: DragRect::default(),
        }
    }
}

impl Tool for EllipseTool {
    fn name(&self) -> &'static str {
        "Ellipse"
    }

    fn configure(&mut self, drag: DragRect) {
        self.drag = drag;
    }

    fn render(&self, surface: &mut Surface) {
        let rect = self.drag.to_rect();
        let mut coverage = Coverage::new(surface.width(), surface.height());
        if self.style.fill {
            coverage.add_filled_ellipse(rect);
        } else {
            coverage.add_ellipse_outline(rect, self.style.width);
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
