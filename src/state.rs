/// Interaction state of the editor.
///
/// ```text
///            pointer down
///   ┌──────┐ ────────────► ┌──────────┐ ──┐
///   │ Idle │               │ Dragging │   │ pointer move
///   └──────┘ ◄──────────── └──────────┘ ◄─┘
///             pointer up
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    /// A pointer is held down and the drag rectangle is live
    Dragging,
}

impl EditorState {
    /// Returns true if the editor is currently idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging => "Dragging",
        }
    }
}
