//! Numeric geometry editing of the selection (x, y, width, height, rotation).
//!
//! Values are read from and written to each node's rect in its parent
//! space. With several nodes selected a key that differs between them is
//! reported as [`GeometryValue::Mixed`], and edits apply to every node.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};
use vectorkit_core::{MRect, NodeId};

use crate::node_store::{GeometryField, NodeStore};
use crate::scene_graph::node_mrect;

/// Values closer than this are shown as one.
const SAME_VALUE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeometryKey {
    X,
    Y,
    Width,
    Height,
    Rotation,
}

impl GeometryKey {
    pub const ALL: [GeometryKey; 5] = [
        GeometryKey::X,
        GeometryKey::Y,
        GeometryKey::Width,
        GeometryKey::Height,
        GeometryKey::Rotation,
    ];

    fn read(self, rect: &MRect) -> f64 {
        match self {
            GeometryKey::X => rect.x(),
            GeometryKey::Y => rect.y(),
            GeometryKey::Width => rect.width(),
            GeometryKey::Height => rect.height(),
            GeometryKey::Rotation => rect.rotation(),
        }
    }

    fn write(self, rect: &mut MRect, value: f64) {
        match self {
            GeometryKey::X => rect.set_x(value),
            GeometryKey::Y => rect.set_y(value),
            GeometryKey::Width => rect.set_width(value.max(0.0)),
            GeometryKey::Height => rect.set_height(value.max(0.0)),
            GeometryKey::Rotation => rect.set_rotation(value),
        }
    }
}

impl fmt::Display for GeometryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryKey::X => "x",
            GeometryKey::Y => "y",
            GeometryKey::Width => "width",
            GeometryKey::Height => "height",
            GeometryKey::Rotation => "rotation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryValue {
    Single(f64),
    /// The selected nodes disagree.
    Mixed,
}

impl GeometryValue {
    pub fn single(self) -> Option<f64> {
        match self {
            GeometryValue::Single(value) => Some(value),
            GeometryValue::Mixed => None,
        }
    }
}

/// How an edit combines with the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Adds to each node's own value (dragging a number field).
    #[default]
    Delta,
    /// Replaces each node's value (typing a number).
    Absolute,
}

/// Geometry values of the current selection.
#[derive(Debug, Clone, Default)]
pub struct GeometryPanel {
    values: BTreeMap<GeometryKey, GeometryValue>,
}

impl GeometryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the values of every selected node. Empty when nothing is selected.
    pub fn setup<S: NodeStore + ?Sized>(&mut self, store: &S) {
        self.values.clear();

        let rects: Vec<MRect> = store
            .selected_ids()
            .into_iter()
            .filter_map(|id| read_rect(store, id))
            .collect();
        let Some((first, rest)) = rects.split_first() else {
            return;
        };

        for key in GeometryKey::ALL {
            let value = key.read(first);
            let same = rest
                .iter()
                .all(|rect| (key.read(rect) - value).abs() <= SAME_VALUE_EPSILON);
            let entry = if same {
                GeometryValue::Single(value)
            } else {
                GeometryValue::Mixed
            };
            self.values.insert(key, entry);
        }
    }

    pub fn value(&self, key: GeometryKey) -> Option<GeometryValue> {
        self.values.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies `changes` to every selected node in one store frame and
    /// refreshes the panel. Returns the number of nodes written.
    ///
    /// Width and height never go below zero, and line nodes ignore height.
    pub fn apply<S: NodeStore + ?Sized>(
        &mut self,
        store: &mut S,
        changes: &[(GeometryKey, f64)],
        mode: EditMode,
    ) -> usize {
        if changes.is_empty() {
            return 0;
        }

        let mut written = 0;
        store.begin_frame();
        for id in store.selected_ids() {
            let Some(mut rect) = read_rect(&*store, id) else {
                continue;
            };
            let is_line = store.is_line(id);

            for &(key, value) in changes {
                if key == GeometryKey::Height && is_line {
                    continue;
                }
                let next = match mode {
                    EditMode::Delta => key.read(&rect) + value,
                    EditMode::Absolute => value,
                };
                key.write(&mut rect, next);
            }

            let changed = |wanted: &[GeometryKey]| {
                changes.iter().any(|(key, _)| wanted.contains(key))
            };
            if changed(&[GeometryKey::X, GeometryKey::Y, GeometryKey::Rotation]) {
                store.set_field(id, GeometryField::Matrix(*rect.matrix()));
            }
            if changed(&[GeometryKey::Width]) {
                store.set_field(id, GeometryField::Width(rect.width()));
            }
            if changed(&[GeometryKey::Height]) && !is_line {
                store.set_field(id, GeometryField::Height(rect.height()));
            }
            written += 1;
        }
        store.commit_frame();

        debug!("Geometry edit {:?} applied to {} node(s)", mode, written);
        self.setup(&*store);
        written
    }
}

fn read_rect<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> Option<MRect> {
    match node_mrect(store, id) {
        Ok(rect) => Some(rect),
        Err(err) => {
            warn!("Ignoring node {} in geometry panel: {}", id, err);
            None
        }
    }
}
