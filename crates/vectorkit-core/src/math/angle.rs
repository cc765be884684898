//! Degree based trigonometry helpers.
//!
//! All angles in the editor are degrees. Positive angles turn the x axis
//! toward the y axis, which on a y-down canvas reads as clockwise.
//!
//! Signed results use the half-open range `(-180, 180]`: a half turn is
//! always reported as `+180`, never `-180`.

use super::xy::Xy;

/// Namespace for angle helpers.
pub struct Angle;

impl Angle {
    /// Returns `(cos, sin)` of an angle in degrees.
    ///
    /// Quarter turns are exact so that rotating by 90° keeps matrices free of
    /// `6e-17` noise.
    pub fn cos_sin(degrees: f64) -> (f64, f64) {
        let turn = degrees.rem_euclid(360.0);
        if turn == 0.0 {
            (1.0, 0.0)
        } else if turn == 90.0 {
            (0.0, 1.0)
        } else if turn == 180.0 {
            (-1.0, 0.0)
        } else if turn == 270.0 {
            (0.0, -1.0)
        } else {
            let radians = degrees.to_radians();
            (radians.cos(), radians.sin())
        }
    }

    /// Signed angle swept from `base` to `vector`, in `(-180, 180]`.
    ///
    /// Zero-length input has no direction and yields `0`.
    pub fn sweep(vector: Xy, base: Xy) -> f64 {
        if vector.is_zero() || base.is_zero() {
            return 0.0;
        }
        let degrees = Xy::cross(base, vector)
            .atan2(Xy::dot(base, vector))
            .to_degrees();
        if degrees <= -180.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    /// Signed angle from the x axis to `vector`.
    pub fn sweep_from_x_axis(vector: Xy) -> f64 {
        Self::sweep(vector, Xy::new(1.0, 0.0))
    }

    /// Shortest-arc equivalent of `degrees`, in `(-180, 180]`.
    pub fn minor(degrees: f64) -> f64 {
        let turn = degrees.rem_euclid(360.0);
        if turn > 180.0 {
            turn - 360.0
        } else {
            turn
        }
    }

    /// Equivalent of `degrees` in `[0, 360)`.
    pub fn normalize(degrees: f64) -> f64 {
        let turn = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative input
        if turn >= 360.0 {
            0.0
        } else {
            turn
        }
    }

    /// Degrees to radians.
    pub fn to_radians(degrees: f64) -> f64 {
        degrees.to_radians()
    }

    pub fn to_degrees(radians: f64) -> f64 {
        radians.to_degrees()
    }
}
