//! Borrowed path to the value under inspection.
//!
//! The engine descends with stack-allocated links and only materialises a
//! [`FieldPath`] when something fails.

use crate::{FieldPath, PathSegment};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Trail<'a> {
    Root,
    Field(&'a Trail<'a>, &'a str),
    Index(&'a Trail<'a>, usize),
}

impl<'a> Trail<'a> {
    pub(crate) fn field(&'a self, name: &'a str) -> Trail<'a> {
        Trail::Field(self, name)
    }

    pub(crate) fn index(&'a self, index: usize) -> Trail<'a> {
        Trail::Index(self, index)
    }

    pub(crate) fn to_path(&self) -> FieldPath {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match *current {
                Trail::Root => break,
                Trail::Field(parent, name) => {
                    segments.push(PathSegment::Field(name.to_string()));
                    current = parent;
                }
                Trail::Index(parent, index) => {
                    segments.push(PathSegment::Index(index));
                    current = parent;
                }
            }
        }
        segments.reverse();
        FieldPath::from_segments(segments)
    }
}
