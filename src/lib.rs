#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod snapshot;
pub mod state;
pub mod surface;
pub mod tools;

pub use app::{PaintApp, ToolSettings};
pub use config::EditorConfig;
pub use drag::DragRect;
pub use editor::Editor;
pub use error::{ConfigError, SnapshotError, SurfaceError};
pub use history::SnapshotHistory;
pub use input::{InputEvent, InputHandler, InputLocation};
pub use snapshot::{PendingDecode, Snapshot};
pub use state::EditorState;
pub use surface::{Surface, SurfaceHandle};
pub use tools::{Tool, ToolKind, ToolStyle, ToolType};
