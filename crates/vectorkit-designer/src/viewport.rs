//! Viewport and coordinate transformation for stage rendering.
//!
//! Handles conversion between screen coordinates (pixels) and scene
//! coordinates. Both spaces are y-down, so the mapping is a uniform zoom
//! followed by a pan:
//!
//! ```text
//! screen = scene * zoom + pan
//! scene  = (screen - pan) / zoom
//! ```

use std::fmt;

use vectorkit_core::{Aabb, Xy};
use vectorkit_settings::ViewportSettings;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    pan: Xy,
    canvas_width: f64,
    canvas_height: f64,
    limits: ViewportSettings,
}

impl Viewport {
    /// Creates a new viewport at 100% zoom with the scene origin at the
    /// top-left corner of the canvas.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self::with_settings(canvas_width, canvas_height, ViewportSettings::default())
    }

    pub fn with_settings(canvas_width: f64, canvas_height: f64, limits: ViewportSettings) -> Self {
        Self {
            zoom: 1.0,
            pan: Xy::zero(),
            canvas_width,
            canvas_height,
            limits,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level. Values outside the configured limits are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if self.zoom_in_range(zoom) {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.limits.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.limits.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn pan(&self) -> Xy {
        self.pan
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = Xy::new(x, y);
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan += Xy::new(dx, dy);
    }

    pub fn reset_pan(&mut self) {
        self.pan = Xy::zero();
    }

    /// Converts a screen point to scene coordinates.
    pub fn to_scene_xy(&self, screen: Xy) -> Xy {
        (screen - self.pan).divide(self.zoom)
    }

    /// Converts a screen displacement to a scene displacement. Pan does not
    /// take part.
    pub fn to_scene_shift(&self, shift: Xy) -> Xy {
        shift.divide(self.zoom)
    }

    /// Converts a scene point to screen coordinates.
    pub fn to_screen_xy(&self, scene: Xy) -> Xy {
        scene * self.zoom + self.pan
    }

    pub fn to_screen_shift(&self, shift: Xy) -> Xy {
        shift * self.zoom
    }

    /// Fits the given bounds into the viewport with padding.
    ///
    /// `padding` is the fraction of the canvas reserved on each side
    /// (0.0 - 0.5). Empty bounds leave the viewport unchanged.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - (padding * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / bounds.width();
        let zoom_y = (self.canvas_height * padding_factor) / bounds.height();

        // Use the smaller zoom to fit everything
        let zoom = zoom_x
            .min(zoom_y)
            .clamp(self.limits.min_zoom, self.limits.max_zoom);

        self.zoom = zoom;
        self.center_on(bounds.center());
    }

    /// Zooms while keeping `scene_point` at the same screen position.
    ///
    /// Useful for "zoom to cursor" functionality.
    pub fn zoom_to_point(&mut self, scene_point: Xy, new_zoom: f64) {
        if !self.zoom_in_range(new_zoom) {
            return;
        }

        let screen = self.to_screen_xy(scene_point);
        self.zoom = new_zoom;
        self.pan = screen - scene_point * new_zoom;
    }

    pub fn zoom_in_at(&mut self, scene_point: Xy) {
        self.zoom_to_point(scene_point, self.zoom * self.limits.zoom_step);
    }

    pub fn zoom_out_at(&mut self, scene_point: Xy) {
        self.zoom_to_point(scene_point, self.zoom / self.limits.zoom_step);
    }

    /// Centers the viewport on a scene point.
    pub fn center_on(&mut self, scene_point: Xy) {
        let canvas_center = Xy::new(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.pan = canvas_center - scene_point * self.zoom;
    }

    /// Visible part of the scene.
    pub fn visible_scene(&self) -> Aabb {
        let top_left = self.to_scene_xy(Xy::zero());
        let bottom_right = self.to_scene_xy(Xy::new(self.canvas_width, self.canvas_height));
        Aabb::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Xy::zero();
    }

    fn zoom_in_range(&self, zoom: f64) -> bool {
        zoom > self.limits.min_zoom && zoom < self.limits.max_zoom
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan.x, self.pan.y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
