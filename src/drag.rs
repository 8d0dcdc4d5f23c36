use egui::{Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};

/// Start and end of a pointer drag in surface coordinates.
///
/// The corners are kept exactly as the pointer produced them, so the start
/// may lie right of or below the end. Use [`DragRect::to_rect`] for the
/// normalized rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragRect {
    pub x_start: f32,
    pub y_start: f32,
    pub x_end: f32,
    pub y_end: f32,
}

impl DragRect {
    pub fn new(x_start: f32, y_start: f32, x_end: f32, y_end: f32) -> Self {
        Self { x_start, y_start, x_end, y_end }
    }

    /// A zero-sized drag anchored at `pos`
    pub fn at(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y, pos.x, pos.y)
    }

    pub fn start(&self) -> Pos2 {
        pos2(self.x_start, self.y_start)
    }

    pub fn end(&self) -> Pos2 {
        pos2(self.x_end, self.y_end)
    }

    pub fn set_end(&mut self, pos: Pos2) {
        self.x_end = pos.x;
        self.y_end = pos.y;
    }

    /// The rectangle spanned by the drag with min/max sorted
    pub fn to_rect(&self) -> Rect {
        Rect::from_two_pos(self.start(), self.end())
    }

    /// True when the drag spans no area
    pub fn is_degenerate(&self) -> bool {
        let rect = self.to_rect();
        rect.width() <= 0.0 || rect.height() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_drag_normalizes() {
        let forward = DragRect::new(10.0, 10.0, 100.0, 100.0);
        let backward = DragRect::new(100.0, 100.0, 10.0, 10.0);
        assert_eq!(forward.to_rect(), backward.to_rect());
        assert_eq!(backward.to_rect().min, pos2(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_drag() {
        assert!(DragRect::at(pos2(5.0, 5.0)).is_degenerate());
        assert!(DragRect::new(0.0, 5.0, 40.0, 5.0).is_degenerate());
        assert!(!DragRect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
