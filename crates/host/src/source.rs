//! Host traversal traits
//!
//! A host exposes its reflected classes as root tables. Each table is an
//! ordered list of property entries, and an entry may reference a nested
//! table of the same shape.

use std::borrow::Cow;

/// One property entry of a host table, in host-declared order
#[derive(Debug, Clone)]
pub struct HostProp<'a, T> {
    /// Property name, e.g. `m_iHealth`
    pub name: Cow<'a, str>,
    /// Byte offset relative to the declaring table
    pub offset: i32,
    /// Nested table this property refers to, if any
    pub data_table: Option<T>,
}

/// One root class exposed by the host
#[derive(Debug, Clone)]
pub struct HostClass<'a, T> {
    /// Class name, e.g. `CBasePlayer`
    pub name: Cow<'a, str>,
    /// The class's root table
    pub table: T,
}

/// A reflected table: a name plus ordered property entries
pub trait HostTable: Sized {
    /// The table's own name, e.g. `DT_LocalPlayerExclusive`
    fn name(&self) -> Cow<'_, str>;

    /// Property entries in host-declared order
    fn props(&self) -> impl Iterator<Item = HostProp<'_, Self>> + '_;
}

/// A finite sequence of root classes
pub trait HostClassSource {
    /// Table handle type yielded for each class
    type Table<'a>: HostTable
    where
        Self: 'a;

    /// Root classes in host order
    fn classes(&self) -> impl Iterator<Item = HostClass<'_, Self::Table<'_>>> + '_;
}
