use vectorkit_core::{Matrix, Xy};
use vectorkit_designer::{EdgeSet, HistoryLog, NodeStore, TransformAction, TransformTool};

use crate::common::{assert_close, assert_xy, drag, scene_origin, selected_store};

#[test]
fn test_move_keeps_each_rotation() {
    let (store, ids) = selected_store(&[
        (40.0, 10.0, Matrix::rotation(30.0).shift(Xy::new(10.0, 20.0))),
        (15.0, 25.0, Matrix::rotation(-120.0).shift(Xy::new(200.0, 80.0))),
    ]);
    let before: Vec<Xy> = ids.iter().map(|id| scene_origin(&store, *id)).collect();
    let rotations: Vec<Matrix> = ids.iter().map(|id| store.matrix(*id).unwrap()).collect();

    let mut tool = TransformTool::new(store, HistoryLog::default());
    assert!(!tool.is_single_select());

    tool.begin(TransformAction::Move).unwrap();
    let report = tool
        .update(&drag(Xy::new(50.0, 50.0), Xy::new(20.0, -5.0)))
        .unwrap();
    assert_eq!(report.applied, 2);
    assert!(report.skipped.is_empty());

    for (i, id) in ids.iter().enumerate() {
        let moved = scene_origin(tool.store(), *id) - before[i];
        assert_xy(moved, Xy::new(20.0, -5.0));

        let matrix = tool.store().matrix(*id).unwrap();
        assert!(matrix.vector_only().approx_eq(&rotations[i].vector_only(), 1e-12));
    }

    let outcome = tool.end(true).unwrap();
    assert_eq!(outcome.label, Some("move node"));
    assert_eq!(tool.history().len(), 1);
}

#[test]
fn test_selection_rect_covers_all_nodes() {
    let (store, _) = selected_store(&[
        (10.0, 10.0, Matrix::translation(0.0, 0.0)),
        (10.0, 10.0, Matrix::translation(20.0, 5.0)),
    ]);
    let mut tool = TransformTool::new(store, ());

    let rect = tool.setup().unwrap();
    assert_eq!(rect.matrix(), &Matrix::translation(0.0, 0.0));
    assert_close(rect.width(), 30.0);
    assert_close(rect.height(), 15.0);
    assert_eq!(rect.rotation(), 0.0);
}

#[test]
fn test_resize_right_edge_scales_around_left() {
    let (store, ids) = selected_store(&[
        (10.0, 10.0, Matrix::translation(0.0, 0.0)),
        (10.0, 10.0, Matrix::translation(20.0, 0.0)),
    ]);
    let mut tool = TransformTool::new(store, ());

    tool.begin(TransformAction::Resize {
        edges: EdgeSet::RIGHT,
        uniform: false,
    })
    .unwrap();
    tool.update(&drag(Xy::new(30.0, 5.0), Xy::new(30.0, 0.0)))
        .unwrap();

    let store = tool.store();
    assert_close(store.size(ids[0]).unwrap().width, 20.0);
    assert_close(store.size(ids[1]).unwrap().width, 20.0);
    assert_close(store.size(ids[1]).unwrap().height, 10.0);
    assert_xy(scene_origin(store, ids[0]), Xy::new(0.0, 0.0));
    assert_xy(scene_origin(store, ids[1]), Xy::new(40.0, 0.0));
}

#[test]
fn test_resize_left_edge_keeps_right_fixed() {
    let (store, ids) = selected_store(&[
        (10.0, 10.0, Matrix::translation(10.0, 0.0)),
        (10.0, 10.0, Matrix::translation(30.0, 0.0)),
    ]);
    let mut tool = TransformTool::new(store, ());

    tool.begin(TransformAction::Resize {
        edges: EdgeSet::LEFT,
        uniform: false,
    })
    .unwrap();
    tool.update(&drag(Xy::new(10.0, 5.0), Xy::new(-30.0, 0.0)))
        .unwrap();
    tool.end(true).unwrap();

    assert_xy(scene_origin(tool.store(), ids[0]), Xy::new(-20.0, 0.0));
    assert_xy(scene_origin(tool.store(), ids[1]), Xy::new(20.0, 0.0));

    let bounds = tool.selection_rect().aabb();
    assert_close(bounds.min_x, -20.0);
    assert_close(bounds.max_x, 40.0);
}

#[test]
fn test_rotate_about_selection_center() {
    let (store, ids) = selected_store(&[
        (10.0, 10.0, Matrix::translation(0.0, 0.0)),
        (10.0, 10.0, Matrix::translation(20.0, 0.0)),
    ]);
    let mut tool = TransformTool::new(store, HistoryLog::default());

    tool.begin(TransformAction::Rotate).unwrap();
    // Center is (15, 5): sweep from its right to below it
    tool.update(&drag(Xy::new(30.0, 5.0), Xy::new(-15.0, 15.0)))
        .unwrap();
    assert_xy(
        tool.delta_matrix().apply_xy(Xy::new(15.0, 5.0)),
        Xy::new(15.0, 5.0),
    );

    let store = tool.store();
    assert_xy(scene_origin(store, ids[0]), Xy::new(20.0, -10.0));
    assert_xy(scene_origin(store, ids[1]), Xy::new(20.0, 10.0));
    for id in &ids {
        let matrix = store.matrix(*id).unwrap();
        assert!(matrix.vector_only().approx_eq(&Matrix::rotation(90.0), 1e-12));
    }

    let outcome = tool.end(true).unwrap();
    assert_eq!(outcome.label, Some("rotate node"));
}
