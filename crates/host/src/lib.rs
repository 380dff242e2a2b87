//! netvars Host - Reflected Class Table Traversal
//!
//! This crate handles:
//! - Describing what the resolver needs from a host: a finite sequence of
//!   named root classes, each with an ordered list of property entries
//! - Walking the live `ClientClass` list of a loaded client module
//!
//! # Architecture
//!
//! The resolver in `netvars-core` is written against the [`HostClassSource`]
//! and [`HostTable`] traits only. [`live::LiveClassList`] implements them over
//! raw engine memory; offline snapshots implement them over owned data.
//!
//! # Thread Safety
//!
//! Live tables are read exactly once, during forest construction. The engine
//! never frees them while the client module is loaded.

pub mod error;
pub mod live;
pub mod source;

pub use error::HostError;
pub use live::{LiveClassList, LiveTable};
pub use source::{HostClass, HostClassSource, HostProp, HostTable};

// Re-export SDK constants the resolver needs
pub use netvars_sdk::BASECLASS_PROP_NAME;
