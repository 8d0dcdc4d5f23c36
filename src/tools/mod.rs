use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::drag::DragRect;
use crate::surface::Surface;

/// Style the shell edits directly on the active tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolStyle {
    pub color: Color32,
    /// Stroke width in pixels
    pub width: f32,
    /// Fill closed shapes instead of outlining them
    pub fill: bool,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 5.0,
            fill: false,
        }
    }
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called once when a drag starts, before the first `configure`.
    fn begin(&mut self, _origin: Pos2) {
        // default: nothing to reset
    }

    /// Store the drag rectangle. Corners may come in any order.
    fn configure(&mut self, drag: DragRect);

    /// Paint the configured shape with the current style.
    ///
    /// Only pixels inside the shape's footprint may change, and rendering
    /// twice onto the same baseline must give identical pixels.
    fn render(&self, surface: &mut Surface);

    fn style(&self) -> &ToolStyle;

    fn style_mut(&mut self) -> &mut ToolStyle;
}

mod stroke_helper;
pub use stroke_helper::StrokeHelper;

mod brush;
pub use brush::BrushTool;

mod eraser;
pub use eraser::EraserTool;

mod rectangle;
pub use rectangle::RectangleTool;

mod line;
pub use line::LineTool;

mod ellipse;
pub use ellipse::EllipseTool;

/// Serializable tool discriminant used by config, persistence and the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Brush,
    Rectangle,
    Line,
    Ellipse,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Brush,
        ToolKind::Rectangle,
        ToolKind::Line,
        ToolKind::Ellipse,
        ToolKind::Eraser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Rectangle => "Rectangle",
            Self::Line => "Line",
            Self::Ellipse => "Ellipse",
            Self::Eraser => "Eraser",
        }
    }

    /// Create a fresh tool of this kind with the given style
    pub fn instantiate(self, style: ToolStyle) -> ToolType {
        match self {
            Self::Brush => ToolType::Brush(BrushTool::new(style)),
            Self::Rectangle => ToolType::Rectangle(RectangleTool::new(style)),
            Self::Line => ToolType::Line(LineTool::new(style)),
            Self::Ellipse => ToolType::Ellipse(EllipseTool::new(style)),
            Self::Eraser => ToolType::Eraser(EraserTool::new(style)),
        }
    }
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    Brush(BrushTool),
    Rectangle(RectangleTool),
    Line(LineTool),
    Ellipse(EllipseTool),
    Eraser(EraserTool),
}

impl Default for ToolType {
    fn default() -> Self {
        Self::Brush(BrushTool::default())
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Brush(tool) => tool.name(),
            Self::Rectangle(tool) => tool.name(),
            Self::Line(tool) => tool.name(),
            Self::Ellipse(tool) => tool.name(),
            Self::Eraser(tool) => tool.name(),
        }
    }

    fn begin(&mut self, origin: Pos2) {
        match self {
            Self::Brush(tool) => tool.begin(origin),
            Self::Rectangle(tool) => tool.begin(origin),
            Self::Line(tool) => tool.begin(origin),
            Self::Ellipse(tool) => tool.begin(origin),
            Self::Eraser(tool) => tool.begin(origin),
        }
    }

    fn configure(&mut self, drag: DragRect) {
        match self {
            Self::Brush(tool) => tool.configure(drag),
            Self::Rectangle(tool) => tool.configure(drag),
            Self::Line(tool) => tool.configure(drag),
            Self::Ellipse(tool) => tool.configure(drag),
            Self::Eraser(tool) => tool.configure(drag),
        }
    }

    fn render(&self, surface: &mut Surface) {
        match self {
            Self::Brush(tool) => tool.render(surface),
            Self::Rectangle(tool) => tool.render(surface),
            Self::Line(tool) => tool.render(surface),
            Self::Ellipse(tool) => tool.render(surface),
            Self::Eraser(tool) => tool.render(surface),
        }
    }

    fn style(&self) -> &ToolStyle {
        match self {
            Self::Brush(tool) => tool.style(),
            Self::Rectangle(tool) => tool.style(),
            Self::Line(tool) => tool.style(),
            Self::Ellipse(tool) => tool.style(),
            Self::Eraser(tool) => tool.style(),
        }
    }

    fn style_mut(&mut self) -> &mut ToolStyle {
        match self {
            Self::Brush(tool) => tool.style_mut(),
            Self::Rectangle(tool) => tool.style_mut(),
            Self::Line(tool) => tool.style_mut(),
            Self::Ellipse(tool) => tool.style_mut(),
            Self::Eraser(tool) => tool.style_mut(),
        }
    }
}

impl ToolType {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Brush(_) => ToolKind::Brush,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Line(_) => ToolKind::Line,
            Self::Ellipse(_) => ToolKind::Ellipse,
            Self::Eraser(_) => ToolKind::Eraser,
        }
    }
}
