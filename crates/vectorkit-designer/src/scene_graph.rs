//! Ancestry walks over a [`NodeStore`].
//!
//! A node's matrix is relative to its parent. Its scene placement is the
//! product of every ancestor matrix, outermost first, followed by its own.

use std::collections::HashSet;

use tracing::warn;
use vectorkit_core::{GeometryError, GeometryResult, MRect, Matrix, NodeId};

use crate::node_store::NodeStore;

/// Product of the ancestor matrices of `id`, excluding its own.
///
/// Maps the node's parent space into scene space. Identity for root nodes.
pub fn forward_accumulated_matrix<S: NodeStore + ?Sized>(
    store: &S,
    id: NodeId,
) -> GeometryResult<Matrix> {
    if store.matrix(id).is_none() {
        return Err(GeometryError::UnknownNode { node: id });
    }

    let mut visited = HashSet::from([id]);
    let mut accumulated = Matrix::identity();
    let mut current = store.parent_id(id);

    while let Some(ancestor) = current {
        if !visited.insert(ancestor) {
            warn!("Cyclic ancestry detected at node {}", ancestor);
            return Err(GeometryError::CyclicAncestry { node: ancestor });
        }
        let matrix = store
            .matrix(ancestor)
            .ok_or(GeometryError::UnknownNode { node: ancestor })?;
        // Walking outward, each ancestor wraps what was collected so far
        accumulated = accumulated.prepend(&matrix);
        current = store.parent_id(ancestor);
    }

    Ok(accumulated)
}

/// Node matrix in scene space.
pub fn scene_matrix<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> GeometryResult<Matrix> {
    let forward = forward_accumulated_matrix(store, id)?;
    let own = store
        .matrix(id)
        .ok_or(GeometryError::UnknownNode { node: id })?;
    Ok(forward.append(&own))
}

/// Oriented rect of the node in its parent space.
pub fn node_mrect<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> GeometryResult<MRect> {
    let size = store.size(id).ok_or(GeometryError::UnknownNode { node: id })?;
    let matrix = store
        .matrix(id)
        .ok_or(GeometryError::UnknownNode { node: id })?;
    Ok(MRect::new(size.width, size.height, matrix))
}

/// Oriented rect of the node in scene space.
///
/// Ancestor scaling is folded into the rect, so the result keeps a
/// unit-scale matrix.
pub fn scene_mrect<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> GeometryResult<MRect> {
    let forward = forward_accumulated_matrix(store, id)?;
    let mut rect = node_mrect(store, id)?;
    rect.transform(&forward, false);
    Ok(rect)
}
