//! History hooks for finished edits.
//!
//! The transform tool does not keep undo state itself. When a session ends
//! with a real change it hands a label to a [`GeometryHistory`], which is
//! where a host records its undo step.

use tracing::debug;

pub trait GeometryHistory {
    /// Records one finished edit.
    fn commit(&mut self, label: &str);
}

/// Discards every entry.
impl GeometryHistory for () {
    fn commit(&mut self, _label: &str) {}
}

/// Bounded log of history labels, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<String>,
    max_depth: usize,
}

impl HistoryLog {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(100)
    }
}

impl GeometryHistory for HistoryLog {
    fn commit(&mut self, label: &str) {
        self.entries.push(label.to_string());
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        debug!("History entry recorded: {}", label);
    }
}

impl<H: GeometryHistory + ?Sized> GeometryHistory for &mut H {
    fn commit(&mut self, label: &str) {
        (**self).commit(label);
    }
}
