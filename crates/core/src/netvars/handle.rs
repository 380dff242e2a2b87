//! Eagerly resolved netvar offsets
//!
//! A [`NetvarHandle`] resolves its path once, at construction, and then only
//! carries the resulting `i32`. Construction never fails: a path that does
//! not match the host schema is logged and leaves the handle at
//! [`UNRESOLVED_OFFSET`]. Reading the offset of such a handle is a bug and
//! panics.

use std::ffi::c_void;

use tracing::warn;

use super::registry::NetvarRegistry;

/// Offset held by a handle whose path failed to resolve
pub const UNRESOLVED_OFFSET: i32 = -1;

/// A resolved netvar offset
///
/// # Example
///
/// ```ignore
/// let health = NetvarHandle::in_table(&registry, "m_iHealth", "CBasePlayer");
/// let velocity = NetvarHandle::new(&registry, "CBasePlayer.m_Local.m_vecVelocity");
///
/// unsafe {
///     let hp: i32 = health.read(player_ptr);
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetvarHandle {
    offset: i32,
}

impl NetvarHandle {
    /// Resolve a chained property path, summing offsets along the way
    pub fn new(registry: &NetvarRegistry, full_path: &str) -> Self {
        match registry.resolve(full_path) {
            Ok(offset) => Self { offset },
            Err(e) => {
                warn!("{} (netvar {})", e, full_path);
                Self::unresolved()
            }
        }
    }

    /// Resolve `prop` inside a dotted class path
    pub fn in_table(registry: &NetvarRegistry, prop: &str, class_path: &str) -> Self {
        match registry.resolve_in(prop, class_path) {
            Ok(offset) => Self { offset },
            Err(e) => {
                warn!("{} (netvar {} in {})", e, prop, class_path);
                Self::unresolved()
            }
        }
    }

    /// A handle that resolved nothing
    pub const fn unresolved() -> Self {
        Self {
            offset: UNRESOLVED_OFFSET,
        }
    }

    /// Check if the path resolved
    pub const fn is_resolved(&self) -> bool {
        self.offset != UNRESOLVED_OFFSET
    }

    /// Get the resolved offset
    ///
    /// # Panics
    /// Panics if the path failed to resolve. The failure itself was logged
    /// when the handle was constructed.
    pub fn offset(&self) -> i32 {
        assert!(
            self.is_resolved(),
            "netvar offset read from a handle that failed to resolve"
        );
        self.offset
    }

    /// Get the offset without panicking
    pub fn try_offset(&self) -> Option<i32> {
        self.is_resolved().then_some(self.offset)
    }

    /// Read the field value from an object pointer
    ///
    /// # Safety
    /// - `base` must be a valid pointer to an object of the resolved class
    /// - `T` must match the actual field type
    /// - The object must remain valid for the duration of the read
    ///
    /// # Panics
    /// Panics if the handle is unresolved.
    #[inline]
    pub unsafe fn read<T: Copy>(&self, base: *const c_void) -> T {
        debug_assert!(!base.is_null(), "Null object pointer");
        let ptr = base.byte_offset(self.offset() as isize) as *const T;
        ptr.read_unaligned()
    }

    /// Write a value to the field
    ///
    /// # Safety
    /// Same requirements as [`read`](Self::read).
    ///
    /// # Panics
    /// Panics if the handle is unresolved.
    #[inline]
    pub unsafe fn write<T: Copy>(&self, base: *mut c_void, value: T) {
        debug_assert!(!base.is_null(), "Null object pointer");
        let ptr = base.byte_offset(self.offset() as isize) as *mut T;
        ptr.write_unaligned(value);
    }

    /// Read the field value, returning None if unresolved or `base` is null
    ///
    /// # Safety
    /// Same requirements as [`read`](Self::read).
    pub unsafe fn try_read<T: Copy>(&self, base: *const c_void) -> Option<T> {
        if base.is_null() {
            return None;
        }
        let offset = self.try_offset()?;
        let ptr = base.byte_offset(offset as isize) as *const T;
        Some(ptr.read_unaligned())
    }
}

impl Default for NetvarHandle {
    fn default() -> Self {
        Self::unresolved()
    }
}
