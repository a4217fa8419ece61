//! Diagnostic path tracker.
//!
//! A scoped stack of object-key / array-index segments owned by one
//! in-flight traversal. Every descent pushes exactly one segment and pops it
//! on every exit path.

use std::fmt;

/// One step of a traversal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "[:]{k}"),
            PathSegment::Index(i) => write!(f, "[]{i}"),
        }
    }
}

/// The current traversal position, rendered as e.g. `[:]user[]3[:]id`.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Removes the innermost segment; a no-op on an empty path.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Canonical diagnostic rendering of the whole path.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            use fmt::Write;
            let _ = write!(out, "{segment}");
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
