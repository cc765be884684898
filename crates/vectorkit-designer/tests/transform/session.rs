use vectorkit_core::{Matrix, Xy};
use vectorkit_designer::{
    DragTracker, EdgeSet, HistoryLog, NodeStore, TransformAction, TransformTool,
};
use vectorkit_settings::EditorSettings;

use crate::common::{assert_close, drag, selected_store};

#[test]
fn test_no_history_without_displacement() {
    let (store, ids) = selected_store(&[(10.0, 10.0, Matrix::translation(3.0, 4.0))]);
    let mut tool = TransformTool::new(store, HistoryLog::default());
    let mut tracker = DragTracker::new();

    tool.begin(TransformAction::Move).unwrap();
    tracker.start(Xy::new(5.0, 5.0));
    let end = tracker.end();
    assert!(!end.moved);

    let outcome = tool.end(end.moved).unwrap();
    assert!(!outcome.moved);
    assert_eq!(outcome.label, None);
    assert!(tool.history().is_empty());
    assert_eq!(
        tool.store().matrix(ids[0]),
        Some(Matrix::translation(3.0, 4.0))
    );
}

#[test]
fn test_one_frame_per_update() {
    let (store, _) = selected_store(&[
        (10.0, 10.0, Matrix::identity()),
        (10.0, 10.0, Matrix::translation(20.0, 0.0)),
    ]);
    let mut tool = TransformTool::new(store, ());
    let mut tracker = DragTracker::new();

    tool.begin(TransformAction::Move).unwrap();
    tracker.start(Xy::zero());
    for _ in 0..3 {
        tracker.push_motion(Xy::new(1.0, 0.0));
        tracker.push_motion(Xy::new(1.0, 1.0));
        let frame = tracker.flush_frame().unwrap();
        tool.update(&frame).unwrap();
    }
    assert_eq!(tool.store().committed_frames(), 3);
    assert_eq!(tool.delta_matrix(), &Matrix::translation(6.0, 3.0));

    tool.end(tracker.end().moved).unwrap();
    assert_eq!(tool.delta_matrix(), &Matrix::identity());
    assert!(!tool.is_active());
}

#[test]
fn test_abort_skips_history() {
    let (store, ids) = selected_store(&[(10.0, 10.0, Matrix::identity())]);
    let mut tool = TransformTool::new(store, HistoryLog::default());

    tool.begin(TransformAction::Move).unwrap();
    tool.update(&drag(Xy::zero(), Xy::new(4.0, 0.0))).unwrap();
    tool.abort().unwrap();

    assert!(!tool.is_active());
    assert!(tool.history().is_empty());
    assert_eq!(tool.store().matrix(ids[0]), Some(Matrix::translation(4.0, 0.0)));
    assert_eq!(tool.selection_rect().matrix(), &Matrix::translation(4.0, 0.0));
}

#[test]
fn test_end_without_session() {
    let (store, _) = selected_store(&[(10.0, 10.0, Matrix::identity())]);
    let mut tool = TransformTool::new(store, HistoryLog::default());

    let outcome = tool.end(true).unwrap();
    assert_eq!(outcome.label, None);
    assert!(tool.history().is_empty());
}

#[test]
fn test_empty_selection() {
    let (mut store, _) = selected_store(&[(10.0, 10.0, Matrix::identity())]);
    store.deselect_all();
    let mut tool = TransformTool::new(store, ());

    let rect = tool.setup().unwrap();
    assert_eq!(rect.width(), 0.0);
    assert_eq!(rect.height(), 0.0);

    tool.begin(TransformAction::Move).unwrap();
    let report = tool.update(&drag(Xy::zero(), Xy::new(1.0, 1.0))).unwrap();
    assert_eq!(report.applied, 0);
}

#[test]
fn test_borrowed_store_and_history() {
    let (mut store, ids) = selected_store(&[(10.0, 10.0, Matrix::identity())]);
    let mut history = HistoryLog::new(8);

    {
        let mut tool = TransformTool::new(&mut store, &mut history);
        tool.begin(TransformAction::Rotate).unwrap();
        tool.update(&drag(Xy::new(10.0, 5.0), Xy::new(-5.0, 5.0)))
            .unwrap();
        tool.end(true).unwrap();
    }

    assert_eq!(history.last(), Some("rotate node"));
    let matrix = store.matrix(ids[0]).unwrap();
    assert!(matrix.vector_only().approx_eq(&Matrix::rotation(90.0), 1e-12));
}

#[test]
fn test_settings_drive_grid_and_uniform_resize() {
    let mut settings = EditorSettings::default();
    settings.grid.enabled = true;
    settings.grid.unit = 10.0;
    settings.transform.uniform_resize_by_default = true;

    let (store, ids) = selected_store(&[(20.0, 20.0, Matrix::translation(2.0, 3.0))]);
    let mut tool = TransformTool::from_settings(store, (), &settings);

    tool.begin(TransformAction::Move).unwrap();
    tool.update(&drag(Xy::zero(), Xy::new(4.0, 4.0))).unwrap();
    tool.end(true).unwrap();
    assert_eq!(
        tool.store().matrix(ids[0]),
        Some(Matrix::translation(10.0, 10.0))
    );

    // Uniform by default; the shift flag turns it off
    tool.begin(TransformAction::Resize {
        edges: EdgeSet::RIGHT | EdgeSet::BOTTOM,
        uniform: false,
    })
    .unwrap();
    tool.update(&drag(Xy::new(30.0, 30.0), Xy::new(10.0, 0.0)))
        .unwrap();
    let size = tool.store().size(ids[0]).unwrap();
    assert_close(size.width, 30.0);
    assert_close(size.height, 30.0);
    tool.end(true).unwrap();

    tool.begin(TransformAction::Resize {
        edges: EdgeSet::RIGHT | EdgeSet::BOTTOM,
        uniform: true,
    })
    .unwrap();
    tool.update(&drag(Xy::new(40.0, 40.0), Xy::new(10.0, 0.0)))
        .unwrap();
    let size = tool.store().size(ids[0]).unwrap();
    assert_close(size.width, 40.0);
    assert_close(size.height, 30.0);
}

#[test]
fn test_into_parts() {
    let (store, ids) = selected_store(&[(10.0, 10.0, Matrix::identity())]);
    let mut tool = TransformTool::new(store, HistoryLog::default());
    tool.begin(TransformAction::Move).unwrap();
    tool.update(&drag(Xy::zero(), Xy::new(0.0, 2.0))).unwrap();
    tool.end(true).unwrap();

    let (store, history) = tool.into_parts();
    assert_eq!(store.matrix(ids[0]), Some(Matrix::translation(0.0, 2.0)));
    assert_eq!(history.entries(), ["move node"]);
}
