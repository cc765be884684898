//! Grid snapping for moved selections.

use vectorkit_settings::GridSettings;

pub trait GridSnap {
    /// Snaps one scene coordinate.
    fn snap(&self, value: f64) -> f64;
}

/// Leaves every coordinate where it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl GridSnap for NoSnap {
    fn snap(&self, value: f64) -> f64 {
        value
    }
}

impl GridSnap for GridSettings {
    fn snap(&self, value: f64) -> f64 {
        GridSettings::snap(self, value)
    }
}

impl<F: Fn(f64) -> f64> GridSnap for F {
    fn snap(&self, value: f64) -> f64 {
        self(value)
    }
}
