use vectorkit_core::{Matrix, Xy};
use vectorkit_designer::{
    scene_mrect, EdgeSet, HistoryLog, NodeStore, SceneStore, TransformAction, TransformTool,
};

use crate::common::{assert_close, assert_xy, drag, scene_origin};

#[test]
fn test_move_child_of_rotated_parent() {
    let mut store = SceneStore::new();
    let placement = Matrix::rotation(90.0).shift(Xy::new(50.0, 50.0));
    let group = store.add_node("group", 0.0, 0.0, placement);
    let child = store
        .add_child(group, "child", 20.0, 10.0, Matrix::translation(5.0, 0.0))
        .unwrap();
    store.select(child);
    let before = scene_origin(&store, child);

    let mut tool = TransformTool::new(store, ());
    tool.begin(TransformAction::Move).unwrap();
    tool.update(&drag(Xy::zero(), Xy::new(10.0, 0.0))).unwrap();

    assert_xy(scene_origin(tool.store(), child) - before, Xy::new(10.0, 0.0));
    // Scene +x is the parent's -y
    let local = tool.store().matrix(child).unwrap();
    assert_close(local.tx, 5.0);
    assert_close(local.ty, -10.0);
}

#[test]
fn test_move_child_of_scaled_parent() {
    let mut store = SceneStore::new();
    let group = store.add_node("group", 0.0, 0.0, Matrix::scaling(2.0, 2.0));
    let child = store
        .add_child(group, "child", 10.0, 10.0, Matrix::translation(5.0, 5.0))
        .unwrap();
    store.select(child);

    let mut tool = TransformTool::new(store, ());
    tool.begin(TransformAction::Move).unwrap();
    tool.update(&drag(Xy::zero(), Xy::new(10.0, 0.0))).unwrap();

    let store = tool.store();
    assert_xy(scene_origin(store, child), Xy::new(20.0, 10.0));
    assert!(store
        .matrix(child)
        .unwrap()
        .approx_eq(&Matrix::translation(10.0, 5.0), 1e-12));
    assert_close(store.size(child).unwrap().width, 10.0);
}

#[test]
fn test_resize_child_of_scaled_parent_in_local_units() {
    let mut store = SceneStore::new();
    let group = store.add_node("group", 0.0, 0.0, Matrix::scaling(2.0, 2.0));
    let child = store
        .add_child(group, "child", 10.0, 10.0, Matrix::translation(5.0, 5.0))
        .unwrap();
    store.select(child);

    let mut tool = TransformTool::new(store, ());
    assert_close(tool.setup().unwrap().width(), 20.0);

    tool.begin(TransformAction::Resize {
        edges: EdgeSet::LEFT,
        uniform: false,
    })
    .unwrap();
    tool.update(&drag(Xy::new(10.0, 10.0), Xy::new(-20.0, 0.0)))
        .unwrap();

    let rect = scene_mrect(tool.store(), child).unwrap();
    assert_close(rect.aabb().min_x, -10.0);
    assert_close(rect.aabb().max_x, 30.0);
    assert_close(tool.store().size(child).unwrap().width, 20.0);
}

#[test]
fn test_rotate_child_of_rotated_parent() {
    let mut store = SceneStore::new();
    let group = store.add_node("group", 0.0, 0.0, Matrix::rotation(45.0));
    let child = store
        .add_child(group, "child", 10.0, 10.0, Matrix::translation(20.0, 0.0))
        .unwrap();
    store.select(child);
    let center = scene_mrect(&store, child).unwrap().center();

    let mut tool = TransformTool::new(store, ());
    tool.begin(TransformAction::Rotate).unwrap();
    let start = center + Xy::new(10.0, 0.0);
    tool.update(&drag(start, Xy::new(-10.0, 10.0))).unwrap();

    let rect = scene_mrect(tool.store(), child).unwrap();
    assert_close(rect.rotation(), 135.0);
    assert_xy(rect.center(), center);
    assert!(!tool.store().matrix(child).unwrap().is_flipped());
}

#[test]
fn test_degenerate_ancestor_is_skipped() {
    let mut store = SceneStore::new();
    let flat = store.add_node("flat", 0.0, 0.0, Matrix::scaling(0.0, 1.0));
    let child = store
        .add_child(flat, "child", 10.0, 10.0, Matrix::translation(1.0, 1.0))
        .unwrap();
    let sibling = store.add_node("sibling", 10.0, 10.0, Matrix::translation(50.0, 0.0));
    store.select(child);
    store.select(sibling);

    let mut tool = TransformTool::new(store, HistoryLog::default());
    tool.begin(TransformAction::Move).unwrap();
    let report = tool.update(&drag(Xy::zero(), Xy::new(5.0, 5.0))).unwrap();

    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, vec![child]);
    assert_eq!(
        tool.store().matrix(child),
        Some(Matrix::translation(1.0, 1.0))
    );
    assert_xy(scene_origin(tool.store(), sibling), Xy::new(55.0, 5.0));

    let outcome = tool.end(true).unwrap();
    assert!(outcome.moved);
    assert_eq!(tool.history().len(), 1);
}

#[test]
fn test_resize_under_degenerate_ancestor_is_skipped() {
    let mut store = SceneStore::new();
    let flat = store.add_node("flat", 0.0, 0.0, Matrix::scaling(0.0, 1.0));
    let child = store
        .add_child(flat, "child", 10.0, 10.0, Matrix::translation(1.0, 1.0))
        .unwrap();
    store.select(child);

    let mut tool = TransformTool::new(store, HistoryLog::default());
    tool.begin(TransformAction::Resize {
        edges: EdgeSet::RIGHT,
        uniform: false,
    })
    .unwrap();

    for step in 1..=3 {
        let shift = Xy::new(4.0 * step as f64, 0.0);
        let report = tool.update(&drag(Xy::zero(), shift)).unwrap();
        assert_eq!(report.applied, 0);
        assert_eq!(report.skipped, vec![child]);
    }

    assert_eq!(tool.store().committed_frames(), 0);
    let node = tool.store().node(child).unwrap();
    assert_eq!(node.width, 10.0);
    assert_eq!(node.matrix, Matrix::translation(1.0, 1.0));
    assert_eq!(*tool.delta_matrix(), Matrix::identity());
    assert!(tool.end(true).is_ok());
}

#[test]
fn test_cyclic_ancestry_is_skipped() {
    let mut store = SceneStore::new();
    let a = store.add_node("a", 10.0, 10.0, Matrix::identity());
    let b = store.add_child(a, "b", 10.0, 10.0, Matrix::identity()).unwrap();
    store.set_parent(a, Some(b)).unwrap();
    let free = store.add_node("free", 10.0, 10.0, Matrix::translation(100.0, 0.0));
    store.select(b);
    store.select(free);

    let mut tool = TransformTool::new(store, ());
    let rect = tool.setup().unwrap();
    assert_eq!(rect.matrix(), &Matrix::translation(100.0, 0.0));

    tool.begin(TransformAction::Move).unwrap();
    let report = tool.update(&drag(Xy::zero(), Xy::new(1.0, 0.0))).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, vec![b]);
    assert_xy(scene_origin(tool.store(), free), Xy::new(101.0, 0.0));
}

#[test]
fn test_single_cyclic_selection_fails_to_begin() {
    let mut store = SceneStore::new();
    let a = store.add_node("a", 10.0, 10.0, Matrix::identity());
    store.set_parent(a, Some(a)).unwrap();
    store.select(a);

    let mut tool = TransformTool::new(store, ());
    let err = tool.begin(TransformAction::Move).unwrap_err();
    assert!(err.is_geometry_error());
    assert!(!tool.is_active());
}
