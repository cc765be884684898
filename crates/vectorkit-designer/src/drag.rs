//! Pointer drag tracking.
//!
//! Raw pointer motion arrives far more often than the stage can redraw.
//! [`DragTracker`] accumulates it and hands out at most one [`DragData`] per
//! frame, mapped into scene units through a [`DragSpace`].

use tracing::debug;
use vectorkit_core::{Rect, Xy};

use crate::viewport::Viewport;

/// Maps raw pointer coordinates into scene coordinates.
pub trait DragSpace {
    fn to_scene_xy(&self, xy: Xy) -> Xy;
    fn to_scene_shift(&self, shift: Xy) -> Xy;
}

/// Pointer coordinates that already are scene coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneSpace;

impl DragSpace for SceneSpace {
    fn to_scene_xy(&self, xy: Xy) -> Xy {
        xy
    }

    fn to_scene_shift(&self, shift: Xy) -> Xy {
        shift
    }
}

impl DragSpace for Viewport {
    fn to_scene_xy(&self, xy: Xy) -> Xy {
        Viewport::to_scene_xy(self, xy)
    }

    fn to_scene_shift(&self, shift: Xy) -> Xy {
        Viewport::to_scene_shift(self, shift)
    }
}

/// Snapshot of a drag, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragData {
    pub current: Xy,
    pub start: Xy,
    /// Total displacement since the drag started.
    pub shift: Xy,
    /// Displacement since the previous frame.
    pub delta: Xy,
    /// Normalized rect spanned by the drag.
    pub marquee: Rect,
}

/// Final state of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    pub data: DragData,
    /// Whether the pointer ended anywhere other than where it started.
    pub moved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragTracker<M: DragSpace = SceneSpace> {
    space: M,
    active: bool,
    origin: Xy,
    current: Xy,
    shift: Xy,
    pending: Xy,
    has_pending: bool,
}

impl DragTracker<SceneSpace> {
    pub fn new() -> Self {
        Self::with_space(SceneSpace)
    }
}

impl<M: DragSpace> DragTracker<M> {
    pub fn with_space(space: M) -> Self {
        Self {
            space,
            active: false,
            origin: Xy::zero(),
            current: Xy::zero(),
            shift: Xy::zero(),
            pending: Xy::zero(),
            has_pending: false,
        }
    }

    pub fn space(&self) -> &M {
        &self.space
    }

    /// Mapping used for subsequent frames, e.g. to follow a zoom change.
    pub fn space_mut(&mut self) -> &mut M {
        &mut self.space
    }

    pub fn is_dragging(&self) -> bool {
        self.active
    }

    /// Starts a drag at a raw pointer position, discarding any previous state.
    pub fn start(&mut self, point: Xy) -> DragData {
        self.reset();
        self.active = true;
        self.origin = point;
        self.current = point;
        debug!("Drag started at ({:.1}, {:.1})", point.x, point.y);
        self.data(Xy::zero())
    }

    /// Records raw pointer movement. Nothing is reported until the next
    /// [`DragTracker::flush_frame`].
    pub fn push_motion(&mut self, delta: Xy) {
        if !self.active {
            return;
        }
        self.pending += delta;
        self.has_pending = true;
    }

    /// Applies the motion collected since the last frame.
    ///
    /// Returns `None` when no motion arrived.
    pub fn flush_frame(&mut self) -> Option<DragData> {
        if !self.active || !self.has_pending {
            return None;
        }
        let delta = std::mem::replace(&mut self.pending, Xy::zero());
        self.has_pending = false;

        self.current += delta;
        self.shift = self.current - self.origin;
        Some(self.data(delta))
    }

    /// Ends the drag and resets the tracker.
    ///
    /// Motion that was pushed but never flushed is discarded, so `moved`
    /// agrees with the last reported frame.
    pub fn end(&mut self) -> DragEnd {
        let data = self.data(Xy::zero());
        let moved = self.shift.x != 0.0 || self.shift.y != 0.0;
        debug!("Drag ended, moved: {}", moved);
        self.reset();
        DragEnd { data, moved }
    }

    fn data(&self, delta: Xy) -> DragData {
        DragData {
            current: self.space.to_scene_xy(self.current),
            start: self.space.to_scene_xy(self.origin),
            shift: self.space.to_scene_shift(self.shift),
            delta: self.space.to_scene_shift(delta),
            marquee: self.marquee(),
        }
    }

    fn marquee(&self) -> Rect {
        let x = if self.shift.x < 0.0 {
            self.origin.x + self.shift.x
        } else {
            self.origin.x
        };
        let y = if self.shift.y < 0.0 {
            self.origin.y + self.shift.y
        } else {
            self.origin.y
        };
        let xy = self.space.to_scene_xy(Xy::new(x, y));
        let size = self
            .space
            .to_scene_shift(Xy::new(self.shift.x.abs(), self.shift.y.abs()));
        Rect::new(xy.x, xy.y, size.x, size.y)
    }

    fn reset(&mut self) {
        self.active = false;
        self.origin = Xy::zero();
        self.current = Xy::zero();
        self.shift = Xy::zero();
        self.pending = Xy::zero();
        self.has_pending = false;
    }
}
