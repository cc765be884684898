//! # VectorKit Designer
//!
//! Interactive transform layer of the editor: moving, resizing and rotating
//! selected nodes on a stage whose nodes are nested in parent frames.
//!
//! ## Core Components
//!
//! - **Node Store**: Read/write access to node geometry, frame-batched writes
//! - **Scene Graph**: Ancestor matrix accumulation with cycle detection
//! - **Transform Tool**: Move / resize / rotate sessions over the selection
//! - **Handles**: Resize edges and vertices, rotate points, hit testing
//! - **Drag Tracker**: Per-frame coalescing of pointer motion
//! - **Viewport**: Screen/scene mapping with zoom and pan
//! - **Geometry Panel**: Numeric x / y / width / height / rotation editing
//! - **History**: Hook receiving one labelled entry per finished edit
//!
//! ## Architecture
//!
//! ```text
//! Pointer ─▶ Viewport ─▶ DragTracker ─▶ TransformTool ─▶ NodeStore
//!                                          │   ├── Scene Graph (F⁻¹·D·F)
//!                                          │   └── GridSnap
//!                                          └── GeometryHistory
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use vectorkit_core::{Matrix, Xy};
//! use vectorkit_designer::{
//!     DragTracker, HistoryLog, NodeStore, SceneStore, TransformAction, TransformTool,
//! };
//!
//! let mut store = SceneStore::new();
//! let id = store.add_node("rect", 50.0, 20.0, Matrix::translation(10.0, 10.0));
//! store.select(id);
//!
//! let mut tool = TransformTool::new(store, HistoryLog::default());
//! let mut drag = DragTracker::new();
//!
//! tool.begin(TransformAction::Move)?;
//! drag.start(Xy::new(20.0, 20.0));
//! drag.push_motion(Xy::new(5.0, 0.0));
//! if let Some(frame) = drag.flush_frame() {
//!     tool.update(&frame)?;
//! }
//! let end = drag.end();
//! tool.end(end.moved)?;
//!
//! assert_eq!(tool.store().matrix(id), Some(Matrix::translation(15.0, 10.0)));
//! assert_eq!(tool.history().last(), Some("move node"));
//! # Ok::<(), vectorkit_core::Error>(())
//! ```

pub mod drag;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod node_store;
pub mod scene_graph;
pub mod snap;
pub mod transform_tool;
pub mod viewport;

pub use drag::{DragData, DragEnd, DragSpace, DragTracker, SceneSpace};
pub use geometry::{EditMode, GeometryKey, GeometryPanel, GeometryValue};
pub use handles::{
    edge_segment, handle_anchor, hit_test, hit_test_rotate, resize_cursor_angle,
    rotate_handle_position, Edge, EdgeSet, Handle, HandleLayout,
};
pub use history::{GeometryHistory, HistoryLog};
pub use node_store::{GeometryField, NodeKind, NodeStore, SceneNode, SceneStore};
pub use scene_graph::{forward_accumulated_matrix, node_mrect, scene_matrix, scene_mrect};
pub use snap::{GridSnap, NoSnap};
pub use transform_tool::{
    FrameReport, SessionOutcome, TransformAction, TransformOptions, TransformTool,
};
pub use viewport::Viewport;
