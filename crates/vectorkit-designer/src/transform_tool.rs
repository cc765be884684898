//! Move, resize and rotate of the current selection.
//!
//! A session starts with [`TransformTool::begin`], which snapshots every
//! selected node. Each [`TransformTool::update`] derives one scene-space
//! delta matrix from the drag and re-applies it to the snapshots, so frames
//! never accumulate rounding error. [`TransformTool::end`] drops the
//! snapshots and records a history entry when something moved.
//!
//! Per node the delta is conjugated into the node's parent space with its
//! forward accumulated matrix `F`: `F⁻¹ · D · F`. A resize of a single node
//! is the exception: its delta is built in the node's own local space and
//! applied there directly.

use tracing::{debug, warn};
use vectorkit_core::{
    Aabb, Angle, GeometryError, GeometryResult, MRect, Matrix, NodeId, Result, Xy, SIZE_EPSILON,
};
use vectorkit_settings::{EditorSettings, GridSettings};

use crate::drag::DragData;
use crate::handles::{Edge, EdgeSet};
use crate::history::GeometryHistory;
use crate::node_store::{GeometryField, NodeStore};
use crate::scene_graph::{forward_accumulated_matrix, node_mrect, scene_matrix, scene_mrect};
use crate::snap::{GridSnap, NoSnap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformAction {
    Move,
    /// `uniform` keeps the aspect ratio (shift key).
    Resize { edges: EdgeSet, uniform: bool },
    Rotate,
}

impl TransformAction {
    /// History label recorded when a session of this kind changes something.
    pub fn label(&self) -> &'static str {
        match self {
            TransformAction::Move => "move node",
            TransformAction::Resize { .. } => "resize node",
            TransformAction::Rotate => "rotate node",
        }
    }
}

/// Result of one [`TransformTool::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub applied: usize,
    /// Nodes left untouched because their ancestry could not be resolved.
    pub skipped: Vec<NodeId>,
}

/// Result of ending a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub moved: bool,
    /// History label, present when an entry was committed.
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    /// Resize keeps the aspect ratio unless the shift key says otherwise.
    pub uniform_resize_by_default: bool,
}

#[derive(Debug, Clone)]
struct NodeSnapshot {
    id: NodeId,
    rect: MRect,
}

#[derive(Debug, Clone)]
struct TransformSession {
    action: TransformAction,
    single: bool,
    start_rect: MRect,
    start_matrix: Matrix,
    /// Frame a resize shift is measured in, with the extent it scales.
    resize_frame: MRect,
    snapshots: Vec<NodeSnapshot>,
}

/// Interactive transform of the selected nodes.
pub struct TransformTool<S: NodeStore, H: GeometryHistory = (), G: GridSnap = NoSnap> {
    store: S,
    history: H,
    grid: G,
    options: TransformOptions,
    selection_rect: MRect,
    delta_matrix: Matrix,
    session: Option<TransformSession>,
}

impl<S: NodeStore, H: GeometryHistory> TransformTool<S, H, NoSnap> {
    pub fn new(store: S, history: H) -> Self {
        Self::with_grid(store, history, NoSnap)
    }
}

impl<S: NodeStore, H: GeometryHistory> TransformTool<S, H, GridSettings> {
    /// Tool configured from editor settings: grid snapping and resize mode.
    pub fn from_settings(store: S, history: H, settings: &EditorSettings) -> Self {
        let mut tool = Self::with_grid(store, history, settings.grid);
        tool.options.uniform_resize_by_default = settings.transform.uniform_resize_by_default;
        tool
    }
}

impl<S: NodeStore, H: GeometryHistory, G: GridSnap> TransformTool<S, H, G> {
    pub fn with_grid(store: S, history: H, grid: G) -> Self {
        Self {
            store,
            history,
            grid,
            options: TransformOptions::default(),
            selection_rect: MRect::identity(0.0, 0.0),
            delta_matrix: Matrix::identity(),
            session: None,
        }
    }

    pub fn set_options(&mut self, options: TransformOptions) {
        self.options = options;
    }

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    /// Recomputes the selection rect from the current selection.
    ///
    /// A single node gives its scene rect, several nodes give the unrotated
    /// rect around their scene bounds. Nodes whose ancestry cannot be
    /// resolved are left out of a multiple selection.
    pub fn setup(&mut self) -> Result<MRect> {
        let ids = self.store.selected_ids();
        self.selection_rect = match ids.as_slice() {
            [] => MRect::identity(0.0, 0.0),
            [id] => scene_mrect(&self.store, *id)?,
            _ => {
                let boxes = ids.iter().filter_map(|id| match scene_mrect(&self.store, *id) {
                    Ok(rect) => Some(rect.aabb()),
                    Err(err) => {
                        warn!("Leaving node {} out of the selection rect: {}", id, err);
                        None
                    }
                });
                Aabb::merge(boxes)
                    .map(|aabb| MRect::from_aabb(&aabb))
                    .unwrap_or_else(|| MRect::identity(0.0, 0.0))
            }
        };
        Ok(self.selection_rect.clone())
    }

    pub fn selection_rect(&self) -> &MRect {
        &self.selection_rect
    }

    pub fn is_single_select(&self) -> bool {
        self.store.selected_ids().len() == 1
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn action(&self) -> Option<TransformAction> {
        self.session.as_ref().map(|session| session.action)
    }

    /// Scene-space delta of the latest frame.
    pub fn delta_matrix(&self) -> &Matrix {
        &self.delta_matrix
    }

    /// Starts a session. A session still running is aborted first.
    pub fn begin(&mut self, action: TransformAction) -> Result<()> {
        if self.session.is_some() {
            debug!("Aborting unfinished transform before starting {:?}", action);
            self.abort()?;
        }

        let start_rect = self.setup()?;
        let ids = self.store.selected_ids();
        let single = ids.len() == 1;

        let mut snapshots = Vec::with_capacity(ids.len());
        for id in &ids {
            snapshots.push(NodeSnapshot {
                id: *id,
                rect: node_mrect(&self.store, *id)?,
            });
        }

        let start_matrix = if single {
            Matrix::identity()
        } else {
            *start_rect.matrix()
        };

        // A single node resizes in its own local units, ancestor scale included
        let resize_frame = match snapshots.as_slice() {
            [only] if single => MRect::new(
                only.rect.width(),
                only.rect.height(),
                scene_matrix(&self.store, only.id)?,
            ),
            _ => start_rect.clone(),
        };

        debug!(
            "Transform started: {:?} on {} node(s)",
            action,
            snapshots.len()
        );

        self.delta_matrix = Matrix::identity();
        self.session = Some(TransformSession {
            action,
            single,
            start_rect,
            start_matrix,
            resize_frame,
            snapshots,
        });
        Ok(())
    }

    /// Applies one drag frame to every node of the session, as one store
    /// frame. Without a session this does nothing.
    ///
    /// Nodes that cannot take the delta are reported as skipped. When the
    /// delta itself cannot be built (a single resize under a singular
    /// ancestor) every node is skipped and no frame is opened.
    pub fn update(&mut self, drag: &DragData) -> Result<FrameReport> {
        let Some(session) = self.session.as_ref() else {
            return Ok(FrameReport::default());
        };

        let delta = match session.action {
            TransformAction::Move => Ok(move_delta(session, drag.shift, &self.grid)),
            TransformAction::Resize { edges, uniform } => resize_delta(
                session,
                drag.shift,
                edges,
                uniform != self.options.uniform_resize_by_default,
            ),
            TransformAction::Rotate => rotate_delta(session, drag.current, drag.start),
        };
        // Nodes keep their last applied geometry when no delta can be built
        let delta = match delta {
            Ok(delta) => delta,
            Err(err) => {
                warn!("Skipping {:?} frame: {}", session.action, err);
                return Ok(FrameReport {
                    applied: 0,
                    skipped: session.snapshots.iter().map(|snapshot| snapshot.id).collect(),
                });
            }
        };
        self.delta_matrix = delta;

        let local = session.single && matches!(session.action, TransformAction::Resize { .. });
        let mut report = FrameReport::default();

        self.store.begin_frame();
        for snapshot in &session.snapshots {
            match apply_to_node(&mut self.store, snapshot, &delta, local) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    warn!("Skipping node {}: {}", snapshot.id, err);
                    report.skipped.push(snapshot.id);
                }
            }
        }
        self.store.commit_frame();

        debug!(
            "Transform frame: {} applied, {} skipped",
            report.applied,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Finishes the session. A history entry is committed only when the
    /// drag actually moved.
    pub fn end(&mut self, moved: bool) -> Result<SessionOutcome> {
        let Some(session) = self.session.take() else {
            return Ok(SessionOutcome {
                moved: false,
                label: None,
            });
        };
        self.delta_matrix = Matrix::identity();

        let label = if moved {
            let label = session.action.label();
            self.history.commit(label);
            Some(label)
        } else {
            None
        };
        debug!("Transform ended: {:?}, moved: {}", session.action, moved);

        self.setup()?;
        Ok(SessionOutcome { moved, label })
    }

    /// Drops the session without a history entry. Geometry written by
    /// earlier frames stays.
    pub fn abort(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            debug!("Transform aborted: {:?}", session.action);
        }
        self.delta_matrix = Matrix::identity();
        self.setup()?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_parts(self) -> (S, H) {
        (self.store, self.history)
    }
}

/// Translation by the drag shift, nudged so the moved selection bounds land
/// on the grid.
fn move_delta<G: GridSnap>(session: &TransformSession, shift: Xy, grid: &G) -> Matrix {
    let moved = session.start_rect.aabb().shift(shift);
    let snap = Xy::new(
        grid.snap(moved.min_x) - moved.min_x,
        grid.snap(moved.min_y) - moved.min_y,
    );
    Matrix::translation(shift.x + snap.x, shift.y + snap.y)
}

fn resize_delta(
    session: &TransformSession,
    shift: Xy,
    edges: EdgeSet,
    uniform: bool,
) -> GeometryResult<Matrix> {
    let frame = &session.resize_frame;
    let local = frame.matrix().invert_shift(shift)?;

    let (shift_x, shift_y) = if uniform {
        let max = local.x.max(local.y);
        (max, max)
    } else {
        (local.x, local.y)
    };

    let mut width = frame.width();
    let mut height = frame.height();
    let mut tx = session.start_matrix.tx;
    let mut ty = session.start_matrix.ty;

    if edges.has(Edge::Left) {
        width -= shift_x;
        tx += shift_x;
    }
    if edges.has(Edge::Top) {
        height -= shift_y;
        ty += shift_y;
    }
    if edges.has(Edge::Right) {
        width += shift_x;
    }
    if edges.has(Edge::Bottom) {
        height += shift_y;
    }

    let end = Matrix {
        a: scale_factor(width, frame.width()),
        d: scale_factor(height, frame.height()),
        tx,
        ty,
        ..session.start_matrix
    };
    end.divide(&session.start_matrix)
}

/// Rotation about the selection center by the angle the pointer swept.
fn rotate_delta(session: &TransformSession, current: Xy, start: Xy) -> GeometryResult<Matrix> {
    let center = session.start_rect.center();
    let rotation = Angle::sweep(Xy::vector(current, center), Xy::vector(start, center));

    let bounds = session.start_rect.aabb();
    let start_matrix = Matrix::translation(bounds.min_x, bounds.min_y);
    let mut rect = MRect::from_aabb(&bounds);
    rect.rotate(rotation);
    rect.matrix().divide(&start_matrix)
}

fn scale_factor(size: f64, start: f64) -> f64 {
    if start.abs() < SIZE_EPSILON {
        1.0
    } else {
        size / start
    }
}

fn apply_to_node<S: NodeStore>(
    store: &mut S,
    snapshot: &NodeSnapshot,
    delta: &Matrix,
    local: bool,
) -> GeometryResult<()> {
    let mut rect = snapshot.rect.clone();
    if local {
        rect.transform(delta, true);
    } else {
        let forward = forward_accumulated_matrix(&*store, snapshot.id)?;
        let local_delta = forward.invert()?.append(delta).append(&forward);
        rect.transform(&local_delta, false);
    }

    if !rect.matrix().is_finite() {
        return Err(GeometryError::DegenerateTransform {
            determinant: rect.matrix().determinant(),
        });
    }

    store.set_field(snapshot.id, GeometryField::Width(rect.width()));
    store.set_field(snapshot.id, GeometryField::Height(rect.height()));
    store.set_field(snapshot.id, GeometryField::Matrix(*rect.matrix()));
    Ok(())
}
