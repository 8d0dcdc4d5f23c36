use egui::Pos2;

use crate::drag::DragRect;

/// Helper struct for collecting the path of a freehand stroke
///
/// Shared by the brush and the eraser. Each `follow` call extends the path to
/// the drag's end point; the path restarts whenever the drag origin changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeHelper {
    points: Vec<Pos2>,
}

impl StrokeHelper {
    /// Drop the previous path and start a new one at `origin`
    pub fn begin(&mut self, origin: Pos2) {
        self.points.clear();
        self.points.push(origin);
    }

    /// Extend the path to `drag.end()`.
    ///
    /// Repeating the same end point is ignored so previews stay idempotent.
    pub fn follow(&mut self, drag: DragRect) {
        if self.points.first() != Some(&drag.start()) {
            self.begin(drag.start());
        }
        if self.points.last() != Some(&drag.end()) {
            self.points.push(drag.end());
        }
    }

    /// Get the current points
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}
