use vectorkit_core::{Aabb, Xy};
use vectorkit_designer::Viewport;
use vectorkit_settings::ViewportSettings;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Xy::zero());
    assert_eq!(vp.to_scene_xy(Xy::new(15.0, 25.0)), Xy::new(15.0, 25.0));
}

#[test]
fn test_screen_scene_round_trip() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(2.5);
    vp.pan_by(40.0, -20.0);

    let scene = Xy::new(12.0, -7.0);
    let screen = vp.to_screen_xy(scene);
    assert_eq!(screen, Xy::new(70.0, -37.5));
    let back = vp.to_scene_xy(screen);
    assert!((back.x - scene.x).abs() < 1e-12);
    assert!((back.y - scene.y).abs() < 1e-12);

    // Shifts ignore the pan
    assert_eq!(vp.to_scene_shift(Xy::new(5.0, 10.0)), Xy::new(2.0, 4.0));
}

#[test]
fn test_zoom_limits() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 1.0);
    vp.set_zoom(0.01);
    assert_eq!(vp.zoom(), 1.0);

    vp.zoom_in();
    assert!((vp.zoom() - 1.2).abs() < 1e-12);
    vp.zoom_out();
    assert!((vp.zoom() - 1.0).abs() < 1e-12);

    let limits = ViewportSettings {
        min_zoom: 0.5,
        max_zoom: 2.0,
        zoom_step: 1.5,
    };
    let mut vp = Viewport::with_settings(100.0, 100.0, limits);
    vp.zoom_in();
    assert_eq!(vp.zoom(), 1.5);
    vp.zoom_in();
    assert_eq!(vp.zoom(), 1.5);
}

#[test]
fn test_zoom_to_point_keeps_screen_position() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.set_pan(30.0, 40.0);
    let anchor = Xy::new(100.0, 50.0);
    let before = vp.to_screen_xy(anchor);

    vp.zoom_in_at(anchor);
    let after = vp.to_screen_xy(anchor);
    assert!((after.x - before.x).abs() < 1e-9);
    assert!((after.y - before.y).abs() < 1e-9);
    assert!((vp.zoom() - 1.2).abs() < 1e-12);
}

#[test]
fn test_fit_to_bounds_centers_content() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_bounds(&Aabb::new(0.0, 0.0, 100.0, 100.0), 0.0);

    assert!((vp.zoom() - 5.0).abs() < 1e-12);
    let center = vp.to_screen_xy(Xy::new(50.0, 50.0));
    assert!((center.x - 500.0).abs() < 1e-9);
    assert!((center.y - 250.0).abs() < 1e-9);

    let visible = vp.visible_scene();
    assert!(visible.contains(Xy::new(0.0, 0.0)));
    assert!(visible.contains(Xy::new(100.0, 100.0)));
}

#[test]
fn test_fit_to_empty_bounds_is_ignored() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_bounds(&Aabb::new(5.0, 5.0, 5.0, 5.0), 0.05);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Xy::zero());
}
