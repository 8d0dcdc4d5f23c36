//! The editing engine.
//!
//! The editor turns pointer events into tool renders on a shared [`Surface`]
//! and checkpoints finished strokes as [`Snapshot`]s for undo/redo.
//!
//! # Drag lifecycle
//!
//! - pointer down: capture the surface as the drag *baseline*
//! - pointer move: clear, restore the baseline, render the tool (preview)
//! - pointer up: push the baseline onto the undo stack, clear redo, capture
//!   the finished stroke as the next baseline
//!
//! Previews always start from the baseline, so a tool never draws on top of
//! its own previous preview.
//!
//! # Restores
//!
//! Undo and redo decode a snapshot off-thread. The decode is *issued* by
//! `undo`/`redo` and *completed* by [`Editor::poll_restore`] or
//! [`Editor::settle`]. Anything that reads the surface settles first, so a
//! pending restore is never overtaken.

use egui::Pos2;
use image::RgbaImage;

use crate::config::EditorConfig;
use crate::drag::DragRect;
use crate::error::SnapshotError;
use crate::history::SnapshotHistory;
use crate::input::InputEvent;
use crate::snapshot::{PendingDecode, Snapshot};
use crate::state::EditorState;
use crate::surface::{Surface, SurfaceHandle, WeakSurface};
use crate::tools::{Tool, ToolType};

/// Pixels considered "before the current drag"
#[derive(Debug, Clone)]
struct Baseline {
    snapshot: Snapshot,
    pixels: RgbaImage,
}

impl Baseline {
    fn capture(surface: &Surface) -> Result<Self, SnapshotError> {
        Ok(Self {
            snapshot: Snapshot::capture(surface)?,
            pixels: surface.pixels().clone(),
        })
    }
}

/// An undo/redo whose decode has been issued but not applied yet
#[derive(Debug)]
struct PendingRestore {
    snapshot: Snapshot,
    decode: PendingDecode,
}

#[derive(Debug)]
pub struct Editor {
    surface: Option<WeakSurface>,
    current_tool: Option<ToolType>,
    drag: DragRect,
    state: EditorState,
    baseline: Option<Baseline>,
    history: SnapshotHistory,
    pending_restore: Option<PendingRestore>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    /// Creates an editor with no surface attached yet
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            surface: None,
            current_tool: config.initial_tool(),
            drag: DragRect::default(),
            state: EditorState::Idle,
            baseline: None,
            history: SnapshotHistory::new(config.history_limit),
            pending_restore: None,
        }
    }

    /// Binds the editor to `surface` and captures the initial baseline.
    ///
    /// Rebinding resets the drag state and clears all history, which belongs
    /// to the previous surface.
    pub fn setup(&mut self, surface: &SurfaceHandle) {
        self.settle();
        self.surface = Some(std::sync::Arc::downgrade(surface));
        self.state = EditorState::Idle;
        self.drag = DragRect::default();
        self.history.clear();

        let guard = surface.read();
        match Baseline::capture(&guard) {
            Ok(baseline) => {
                log::info!("Editor attached to {}x{} surface", guard.width(), guard.height());
                self.baseline = Some(baseline);
            }
            Err(e) => {
                log::error!("Failed to capture initial baseline: {}", e);
                self.baseline = None;
            }
        }
    }

    /// Replaces the current tool; takes effect on the next render
    pub fn choose_tool(&mut self, tool: ToolType) {
        log::info!("Tool selected: {}", tool.name());
        self.current_tool = Some(tool);
    }

    /// Deselects the current tool. Pointer-down is ignored until a new one is chosen.
    pub fn clear_tool(&mut self) {
        self.current_tool = None;
    }

    fn live_surface(&self) -> Option<SurfaceHandle> {
        self.surface.as_ref().and_then(|weak| weak.upgrade())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let pos = event.location().position;
        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(pos),
            InputEvent::PointerMove { .. } => self.pointer_move(pos),
            InputEvent::PointerUp { .. } => self.pointer_up(pos),
        }
    }

    /// Idle → Dragging. Ignored without a live surface or a selected tool.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.state.is_dragging() {
            log::debug!("pointer_down while dragging, ignored");
            return;
        }
        if self.current_tool.is_none() {
            return;
        }
        self.settle();
        let Some(surface) = self.live_surface() else {
            return;
        };

        let baseline = match Baseline::capture(&surface.read()) {
            Ok(baseline) => baseline,
            Err(e) => {
                log::error!("Failed to capture drag baseline: {}", e);
                return;
            }
        };

        self.baseline = Some(baseline);
        self.drag = DragRect::at(pos);
        if let Some(tool) = &mut self.current_tool {
            tool.begin(pos);
        }
        self.state = EditorState::Dragging;
        log::debug!("Drag started at ({}, {})", pos.x, pos.y);
    }

    /// Updates the drag end and redraws the preview
    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.state.is_dragging() {
            return;
        }
        self.drag.set_end(pos);
        self.redraw();
    }

    /// Dragging → Idle. Commits the stroke to history.
    ///
    /// The drag rectangle keeps its last moved-to end; `_pos` is not applied.
    pub fn pointer_up(&mut self, _pos: Pos2) {
        if !self.state.is_dragging() {
            return;
        }
        self.state = EditorState::Idle;

        let Some(surface) = self.live_surface() else {
            return;
        };

        // The undo entry is the surface from before this stroke
        if let Some(before) = self.baseline.take() {
            self.history.commit(before.snapshot);
        }

        match Baseline::capture(&surface.read()) {
            Ok(after) => self.baseline = Some(after),
            Err(e) => log::error!("Failed to capture post-stroke baseline: {}", e),
        }
        log::debug!(
            "Stroke committed (undo: {}, redo: {})",
            self.history.undo_len(),
            self.history.redo_len()
        );
    }

    /// Clear, restore the baseline and render the current tool with the live drag.
    ///
    /// Only meaningful mid-drag; while idle the baseline already holds the
    /// last stroke, so this is a no-op.
    pub fn redraw(&mut self) {
        if !self.state.is_dragging() {
            return;
        }
        let drag = self.drag;
        let Some(mut tool) = self.current_tool.take() else {
            return;
        };
        self.draw_with(&mut tool, drag);
        self.current_tool = Some(tool);
    }

    /// Same as [`Editor::redraw`] but with an explicit tool and rectangle.
    /// The current tool is left untouched.
    pub fn draw_with(&mut self, tool: &mut ToolType, drag: DragRect) {
        let Some(surface) = self.live_surface() else {
            return;
        };
        let Some(baseline) = &self.baseline else {
            return;
        };
        let mut surface = surface.write();
        surface.restore(&baseline.pixels);
        tool.configure(drag);
        tool.render(&mut surface);
    }

    /// Clear the surface and restore the baseline without any tool
    pub fn repaint_baseline(&mut self) {
        let (Some(surface), Some(baseline)) = (self.live_surface(), &self.baseline) else {
            return;
        };
        surface.write().restore(&baseline.pixels);
    }

    /// Restore the state before the last committed stroke
    pub fn undo(&mut self) {
        self.step_history(HistoryDirection::Undo);
    }

    /// Re-apply the last undone stroke
    pub fn redo(&mut self) {
        self.step_history(HistoryDirection::Redo);
    }

    fn step_history(&mut self, direction: HistoryDirection) {
        if self.state.is_dragging() {
            log::warn!("{:?} ignored while dragging", direction);
            return;
        }
        let available = match direction {
            HistoryDirection::Undo => self.history.can_undo(),
            HistoryDirection::Redo => self.history.can_redo(),
        };
        if !available {
            return;
        }
        self.settle();
        let Some(surface) = self.live_surface() else {
            return;
        };

        let current = match Snapshot::capture(&surface.read()) {
            Ok(current) => current,
            Err(e) => {
                log::error!("Failed to capture surface for {:?}: {}", direction, e);
                return;
            }
        };

        let target = match direction {
            HistoryDirection::Undo => self.history.undo(current),
            HistoryDirection::Redo => self.history.redo(current),
        };
        let Some(snapshot) = target else {
            return;
        };

        log::debug!(
            "{:?}: issuing restore (undo: {}, redo: {})",
            direction,
            self.history.undo_len(),
            self.history.redo_len()
        );
        // The baseline is replaced once the decode completes
        self.baseline = None;
        self.pending_restore = Some(PendingRestore {
            decode: snapshot.decode_async(),
            snapshot,
        });
    }

    /// Applies a finished restore, if any, without blocking.
    /// Returns true when the surface was repainted.
    pub fn poll_restore(&mut self) -> bool {
        let Some(pending) = &mut self.pending_restore else {
            return false;
        };
        let Some(result) = pending.decode.try_complete() else {
            return false;
        };
        if let Some(pending) = self.pending_restore.take() {
            self.complete_restore(pending.snapshot, result);
        }
        true
    }

    /// Blocks until any pending restore has been applied
    pub fn settle(&mut self) {
        if let Some(pending) = self.pending_restore.take() {
            let result = pending.decode.wait();
            self.complete_restore(pending.snapshot, result);
        }
    }

    fn complete_restore(&mut self, snapshot: Snapshot, result: Result<RgbaImage, SnapshotError>) {
        let decoded = match result {
            Ok(decoded) => decoded,
            Err(e) => {
                log::error!("Snapshot restore failed: {}", e);
                return;
            }
        };
        let Some(surface) = self.live_surface() else {
            return;
        };

        // Re-read the dimensions now; they may differ from the snapshot's
        let mut surface = surface.write();
        surface.restore(&decoded);
        self.baseline = Some(Baseline {
            snapshot,
            pixels: surface.pixels().clone(),
        });
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn drag_rect(&self) -> DragRect {
        self.drag
    }

    pub fn current_tool(&self) -> Option<&ToolType> {
        self.current_tool.as_ref()
    }

    /// Lets the shell edit the active tool's style in place
    pub fn current_tool_mut(&mut self) -> Option<&mut ToolType> {
        self.current_tool.as_mut()
    }

    pub fn has_surface(&self) -> bool {
        self.live_surface().is_some()
    }

    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// The snapshot new previews are drawn over, once any restore has settled
    pub fn baseline(&self) -> Option<&Snapshot> {
        self.baseline.as_ref().map(|baseline| &baseline.snapshot)
    }
}

#[derive(Debug, Clone, Copy)]
enum HistoryDirection {
    Undo,
    Redo,
}
