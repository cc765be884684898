use vectorkit_core::{Matrix, NodeId, Rect, Xy};
use vectorkit_designer::{scene_matrix, DragData, NodeStore, SceneStore};

pub const EPS: f64 = 1e-9;

/// One frame of a drag that went from `start` by `shift`.
pub fn drag(start: Xy, shift: Xy) -> DragData {
    DragData {
        current: start + shift,
        start,
        shift,
        delta: shift,
        marquee: Rect::default(),
    }
}

pub fn scene_origin<S: NodeStore>(store: &S, id: NodeId) -> Xy {
    scene_matrix(store, id).unwrap().apply_xy(Xy::zero())
}

pub fn assert_xy(actual: Xy, expected: Xy) {
    assert!(
        (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn selected_store(nodes: &[(f64, f64, Matrix)]) -> (SceneStore, Vec<NodeId>) {
    let mut store = SceneStore::new();
    let ids: Vec<NodeId> = nodes
        .iter()
        .enumerate()
        .map(|(i, (w, h, m))| store.add_node(format!("node-{}", i), *w, *h, *m))
        .collect();
    for id in &ids {
        store.select(*id);
    }
    (store, ids)
}
