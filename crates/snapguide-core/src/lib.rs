//! SnapGuide Core Library
//!
//! Smart guides for drag-and-drop canvases: measures the dragged element
//! against its nearest reference element, describes the distance guides to
//! draw, and snaps the dragged position to nearby reference edges.

pub mod config;
pub mod edges;
pub mod error;
pub mod input;
pub mod reference;
pub mod scene;
pub mod session;
pub mod snap;
pub mod surface;

pub use config::SnapConfig;
pub use edges::{Axis, Edge, EdgeKind, EdgeSet, compute_edge_set, compute_edges};
pub use error::{ConfigError, TickError};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, OverrideModifier, PointerEvent};
pub use reference::{Reference, ReferenceId, select_nearest};
pub use scene::{Draggable, MemoryDraggable, MemorySurface, PointerCapture, Subscription, Surface};
pub use session::{CursorIcon, DragController, DragSession, DragState, GuideObserver, Tick};
pub use snap::{DEFAULT_SNAP_THRESHOLD, SnapResult, snap_position};
pub use surface::{DragSurface, to_canvas_local};
