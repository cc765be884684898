//! Selection handles: the four edges and four vertices of the selection
//! rect used for resizing, plus the rotate points just outside each vertex.

use bitflags::bitflags;
use vectorkit_core::{Angle, MRect, Xy};
use vectorkit_settings::TransformSettings;

use crate::viewport::Viewport;

/// A side of the selection rect. Index order follows the rect vertices:
/// the top edge runs from vertex 0 to vertex 1, and so on around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn index(self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Right => 1,
            Edge::Bottom => 2,
            Edge::Left => 3,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

bitflags! {
    /// Edges dragged by a resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EdgeSet: u8 {
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
    }
}

impl EdgeSet {
    pub fn has(self, edge: Edge) -> bool {
        self.contains(edge.into())
    }
}

impl From<Edge> for EdgeSet {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => EdgeSet::TOP,
            Edge::Right => EdgeSet::RIGHT,
            Edge::Bottom => EdgeSet::BOTTOM,
            Edge::Left => EdgeSet::LEFT,
        }
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EdgeSet::empty(), |set, edge| set | edge.into())
    }
}

/// A resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Edge(Edge),
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Handle {
    pub const VERTICES: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomRight,
        Handle::BottomLeft,
    ];

    /// Edges moved when this handle is dragged.
    pub fn edges(self) -> EdgeSet {
        match self {
            Handle::Edge(edge) => edge.into(),
            Handle::TopLeft => EdgeSet::TOP | EdgeSet::LEFT,
            Handle::TopRight => EdgeSet::TOP | EdgeSet::RIGHT,
            Handle::BottomRight => EdgeSet::BOTTOM | EdgeSet::RIGHT,
            Handle::BottomLeft => EdgeSet::BOTTOM | EdgeSet::LEFT,
        }
    }

    /// Vertex index for corner handles.
    pub fn vertex_index(self) -> Option<usize> {
        match self {
            Handle::Edge(_) => None,
            Handle::TopLeft => Some(0),
            Handle::TopRight => Some(1),
            Handle::BottomRight => Some(2),
            Handle::BottomLeft => Some(3),
        }
    }
}

/// The two vertices bounding `edge`.
pub fn edge_segment(rect: &MRect, edge: Edge) -> (Xy, Xy) {
    let vertices = rect.vertices();
    let index = edge.index();
    (vertices[index], vertices[(index + 1) % 4])
}

/// Scene position of a handle: the vertex itself, or the middle of the edge.
pub fn handle_anchor(rect: &MRect, handle: Handle) -> Xy {
    match handle {
        Handle::Edge(edge) => {
            let (from, to) = edge_segment(rect, edge);
            (from + to).divide(2.0)
        }
        corner => {
            let index = corner.vertex_index().unwrap_or(0);
            rect.vertices()[index]
        }
    }
}

/// Direction of the resize cursor shown over a handle, in degrees.
///
/// Left/right edges use the rect rotation, top/bottom edges add 90, and the
/// diagonals add 45 (top-left, bottom-right) or -45 (top-right, bottom-left).
pub fn resize_cursor_angle(rect: &MRect, handle: Handle) -> f64 {
    let extra = match handle {
        Handle::Edge(edge) if edge.is_horizontal() => 90.0,
        Handle::Edge(_) => 0.0,
        Handle::TopLeft | Handle::BottomRight => 45.0,
        Handle::TopRight | Handle::BottomLeft => -45.0,
    };
    Angle::minor(rect.rotation() + extra)
}

/// Rotate point for the vertex at `vertex_index`, `offset` scene units
/// outside the vertex along the bisector of its two edges.
pub fn rotate_handle_position(rect: &MRect, vertex_index: usize, offset: f64) -> Xy {
    let vertices = rect.vertices();
    let vertex = vertices[vertex_index % 4];
    let next = vertices[(vertex_index + 1) % 4];
    let prev = vertices[(vertex_index + 3) % 4];

    let mut outward = unit(vertex - next) + unit(vertex - prev);
    if outward.is_zero() {
        outward = vertex - rect.center();
    }
    // lerp continues the ray from `vertex - outward` through `vertex`
    Xy::lerp(vertex, vertex - outward, offset)
}

/// Resize handle under `point`. Vertices win over edges.
pub fn hit_test(rect: &MRect, point: Xy, tolerance: f64) -> Option<Handle> {
    let vertices = rect.vertices();
    let corner = Handle::VERTICES
        .into_iter()
        .zip(vertices)
        .find(|(_, vertex)| Xy::distance(*vertex, point) <= tolerance)
        .map(|(handle, _)| handle);
    if corner.is_some() {
        return corner;
    }

    Edge::ALL
        .into_iter()
        .find(|edge| {
            let (from, to) = edge_segment(rect, *edge);
            distance_to_segment(point, from, to) <= tolerance
        })
        .map(Handle::Edge)
}

/// Rotate point under `point`, by vertex index.
pub fn hit_test_rotate(rect: &MRect, point: Xy, offset: f64, tolerance: f64) -> Option<usize> {
    (0..4).find(|index| {
        Xy::distance(rotate_handle_position(rect, *index, offset), point) <= tolerance
    })
}

/// Handle metrics for the current zoom.
///
/// The rotate offset and the pick tolerance are configured in screen pixels.
/// A layout holds them in scene units for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    rotate_offset: f64,
    tolerance: f64,
}

impl HandleLayout {
    pub fn new(settings: &TransformSettings, viewport: &Viewport) -> Self {
        let scene = viewport.to_scene_shift(Xy::new(
            settings.rotate_handle_offset,
            settings.handle_hit_tolerance,
        ));
        Self {
            rotate_offset: scene.x,
            tolerance: scene.y,
        }
    }

    /// Rotate handle distance from its vertex, in scene units.
    pub fn rotate_offset(&self) -> f64 {
        self.rotate_offset
    }

    /// Pick radius, in scene units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The four rotate points, in vertex order.
    pub fn rotate_handles(&self, rect: &MRect) -> [Xy; 4] {
        [0, 1, 2, 3].map(|index| rotate_handle_position(rect, index, self.rotate_offset))
    }

    pub fn hit_test(&self, rect: &MRect, point: Xy) -> Option<Handle> {
        hit_test(rect, point, self.tolerance)
    }

    pub fn hit_test_rotate(&self, rect: &MRect, point: Xy) -> Option<usize> {
        hit_test_rotate(rect, point, self.rotate_offset, self.tolerance)
    }
}

fn unit(v: Xy) -> Xy {
    let length = v.length();
    if length == 0.0 {
        Xy::zero()
    } else {
        v.divide(length)
    }
}

fn distance_to_segment(point: Xy, from: Xy, to: Xy) -> f64 {
    let segment = to - from;
    let length_sq = Xy::dot(segment, segment);
    if length_sq == 0.0 {
        return Xy::distance(point, from);
    }
    let t = (Xy::dot(point - from, segment) / length_sq).clamp(0.0, 1.0);
    Xy::distance(point, from + segment * t)
}
