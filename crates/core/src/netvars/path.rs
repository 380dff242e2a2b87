//! Dotted path resolution over a [`Forest`]
//!
//! Two path shapes are supported:
//!
//! - **Scoped**: a property name plus a dotted *class* path
//!   (`"m_vecVelocity"` in `"CBasePlayer.DT_Local"`). Each segment after the
//!   root names a nested table. The property's own offset is returned as-is.
//! - **Chained**: a single dotted *property* path
//!   (`"CBasePlayer.m_Local.m_vecVelocity"`). Each segment after the root
//!   names a property; the walk descends through the nested table of the
//!   property just resolved, and offsets are summed along the way.
//!
//! In both shapes the root lookup happens before any syntax check, so an
//! unknown root is always reported as [`NetvarError::ClassNotFound`].

use super::descriptor::{ClassDescriptor, Forest};
use super::error::NetvarError;

/// Split on the first dot: `(root, rest)`
fn split_root(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((root, rest)) => (root, Some(rest)),
        None => (path, None),
    }
}

/// Reject empty segments (`"a..b"`, trailing `"a."`)
fn check_segments<'p>(path: &str, rest: &'p str) -> Result<&'p str, NetvarError> {
    if rest.split('.').any(str::is_empty) {
        return Err(NetvarError::InvalidPath(path.to_string()));
    }
    Ok(rest)
}

impl Forest {
    /// Resolve a dotted class path to its descriptor
    ///
    /// The first segment names a root class; each following segment names a
    /// nested table to descend into. A trailing dot ends the walk, while an
    /// empty interior segment is looked up like any other table name.
    pub fn class(&self, class_path: &str) -> Result<&ClassDescriptor, NetvarError> {
        let (root, rest) = split_root(class_path);
        let mut class = self.root(root)?;

        let mut rest = rest.unwrap_or_default();
        while !rest.is_empty() {
            let (segment, tail) = rest.split_once('.').unwrap_or((rest, ""));
            class = self.nested(class, segment)?;
            rest = tail;
        }

        Ok(class)
    }

    /// Offset of `prop` within the class at `class_path`
    ///
    /// Offsets are not summed: the result is relative to the final nested
    /// table, exactly as the host records it.
    pub fn resolve_in(&self, prop: &str, class_path: &str) -> Result<i32, NetvarError> {
        let class = self.class(class_path)?;
        Ok(class.property(prop)?.offset())
    }

    /// Summed offset of a chained property path
    ///
    /// A path with no property segments (`"CBasePlayer"`) or with an empty
    /// segment is rejected with [`NetvarError::InvalidPath`]. A sum that does
    /// not fit in an `i32` is [`NetvarError::OffsetOverflow`].
    pub fn resolve(&self, full_path: &str) -> Result<i32, NetvarError> {
        let (root, rest) = split_root(full_path);
        let mut class = self.root(root)?;

        let rest = rest.ok_or_else(|| NetvarError::InvalidPath(full_path.to_string()))?;
        let mut segments = check_segments(full_path, rest)?.split('.').peekable();

        let mut offset: i32 = 0;
        while let Some(segment) = segments.next() {
            let prop = class.property(segment)?;
            offset = offset
                .checked_add(prop.offset())
                .ok_or_else(|| NetvarError::OffsetOverflow(full_path.to_string()))?;

            if segments.peek().is_some() {
                class = self.nested(class, prop.nested_table_name())?;
            }
        }

        Ok(offset)
    }
}
