//! Document access used by the transform tool and the geometry panel.
//!
//! The editor never touches a document directly: everything goes through
//! [`NodeStore`], which exposes the geometry of a node (its size and its
//! matrix relative to the parent), the parent link and the current
//! selection. Writes are grouped into frames so that a host can apply one
//! drag update as a single document change.
//!
//! [`SceneStore`] is the in-memory implementation used by tests and by hosts
//! without a document model of their own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vectorkit_core::{GeometryError, GeometryResult, Matrix, NodeId, Size};

/// One geometry property write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryField {
    Width(f64),
    Height(f64),
    Matrix(Matrix),
}

/// Read/write access to the node tree.
pub trait NodeStore {
    /// Matrix of the node relative to its parent.
    fn matrix(&self, id: NodeId) -> Option<Matrix>;

    fn size(&self, id: NodeId) -> Option<Size>;

    /// `None` for root nodes and unknown ids.
    fn parent_id(&self, id: NodeId) -> Option<NodeId>;

    /// Selected nodes, in selection order.
    fn selected_ids(&self) -> Vec<NodeId>;

    fn set_field(&mut self, id: NodeId, field: GeometryField);

    /// Line nodes have no meaningful height.
    fn is_line(&self, _id: NodeId) -> bool {
        false
    }

    /// Opens a batch of writes.
    fn begin_frame(&mut self) {}

    /// Closes the batch opened by [`NodeStore::begin_frame`].
    fn commit_frame(&mut self) {}
}

impl<S: NodeStore + ?Sized> NodeStore for &mut S {
    fn matrix(&self, id: NodeId) -> Option<Matrix> {
        (**self).matrix(id)
    }

    fn size(&self, id: NodeId) -> Option<Size> {
        (**self).size(id)
    }

    fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        (**self).parent_id(id)
    }

    fn selected_ids(&self) -> Vec<NodeId> {
        (**self).selected_ids()
    }

    fn set_field(&mut self, id: NodeId, field: GeometryField) {
        (**self).set_field(id, field)
    }

    fn is_line(&self, id: NodeId) -> bool {
        (**self).is_line(id)
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame()
    }

    fn commit_frame(&mut self) {
        (**self).commit_frame()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    Shape,
    Line,
    Group,
}

/// A node of a [`SceneStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub matrix: Matrix,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn new(id: NodeId, name: impl Into<String>, width: f64, height: f64, matrix: Matrix) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.into(),
            width,
            height,
            matrix,
            kind: NodeKind::Shape,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn apply(&mut self, field: GeometryField) {
        match field {
            GeometryField::Width(width) => self.width = width,
            GeometryField::Height(height) => self.height = height,
            GeometryField::Matrix(matrix) => self.matrix = matrix,
        }
    }
}

/// In-memory node tree with frame-buffered writes.
///
/// Writes made between `begin_frame` and `commit_frame` are held back and
/// applied together when the outermost frame commits. Writes outside a frame
/// apply immediately.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    nodes: HashMap<NodeId, SceneNode>,
    selection: Vec<NodeId>,
    pending: Vec<(NodeId, GeometryField)>,
    frame_depth: usize,
    committed_frames: usize,
    next_id: u64,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node and returns its id.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        width: f64,
        height: f64,
        matrix: Matrix,
    ) -> NodeId {
        let id = self.allocate_id();
        self.nodes
            .insert(id, SceneNode::new(id, name, width, height, matrix));
        id
    }

    /// Adds a node under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        width: f64,
        height: f64,
        matrix: Matrix,
    ) -> GeometryResult<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(GeometryError::UnknownNode { node: parent });
        }
        let id = self.allocate_id();
        let mut node = SceneNode::new(id, name, width, height, matrix);
        node.parent_id = Some(parent);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Inserts a fully built node, replacing any node with the same id.
    pub fn insert(&mut self, node: SceneNode) {
        self.next_id = self.next_id.max(node.id.get());
        self.nodes.insert(node.id, node);
    }

    /// Re-parents a node. The link is stored as given; cycles are only
    /// detected when the ancestry is walked.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> GeometryResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GeometryError::UnknownNode { node: id })?;
        node.parent_id = parent;
        Ok(())
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> GeometryResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GeometryError::UnknownNode { node: id })?;
        node.kind = kind;
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Removes a node and drops it from the selection. Children keep their
    /// dangling parent link.
    pub fn remove_node(&mut self, id: NodeId) -> Option<SceneNode> {
        self.selection.retain(|selected| *selected != id);
        self.nodes.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds `id` to the selection. Unknown and already selected ids are ignored.
    pub fn select(&mut self, id: NodeId) {
        if self.nodes.contains_key(&id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    pub fn select_only(&mut self, id: NodeId) {
        self.selection.clear();
        self.select(id);
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Number of frames applied so far.
    pub fn committed_frames(&self) -> usize {
        self.committed_frames
    }

    pub fn in_frame(&self) -> bool {
        self.frame_depth > 0
    }

    fn allocate_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(self.next_id)
    }

    fn write(&mut self, id: NodeId, field: GeometryField) {
        match self.nodes.get_mut(&id) {
            Some(node) => node.apply(field),
            None => warn!("Dropping write to unknown node {}", id),
        }
    }
}

impl NodeStore for SceneStore {
    fn matrix(&self, id: NodeId) -> Option<Matrix> {
        self.nodes.get(&id).map(|node| node.matrix)
    }

    fn size(&self, id: NodeId) -> Option<Size> {
        self.nodes.get(&id).map(SceneNode::size)
    }

    fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent_id)
    }

    fn selected_ids(&self) -> Vec<NodeId> {
        self.selection
            .iter()
            .copied()
            .filter(|id| self.nodes.contains_key(id))
            .collect()
    }

    fn set_field(&mut self, id: NodeId, field: GeometryField) {
        if self.in_frame() {
            self.pending.push((id, field));
        } else {
            self.write(id, field);
        }
    }

    fn is_line(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.kind == NodeKind::Line)
    }

    fn begin_frame(&mut self) {
        self.frame_depth += 1;
    }

    fn commit_frame(&mut self) {
        match self.frame_depth {
            0 => warn!("commit_frame called without an open frame"),
            1 => {
                self.frame_depth = 0;
                let pending = std::mem::take(&mut self.pending);
                let writes = pending.len();
                for (id, field) in pending {
                    self.write(id, field);
                }
                self.committed_frames += 1;
                debug!("Committed frame {} with {} writes", self.committed_frames, writes);
            }
            _ => self.frame_depth -= 1,
        }
    }
}
