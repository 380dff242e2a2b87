//! Netvars - Dotted-path offset resolution over the host's class tables
//!
//! This module mirrors the host's reflected class tables into an immutable
//! descriptor forest, resolves symbolic property paths against it, and hands
//! out handles that carry the resolved offset.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Host (ClientClass list / JSON dump)            │
//! │   HostClassSource::classes() → HostTable::props()           │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ walked once
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      NetvarRegistry                         │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │ Forest: slot arena of ClassDescriptors + roots      │   │
//! │  │   resolve_in(prop, "Class.Table") - no summing      │   │
//! │  │   resolve("Class.prop.prop")      - summed          │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │  DashMap memo of successful resolutions                     │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ resolved once
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  NetvarHandle { offset: i32 }  (-1 = unresolved, logged)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use netvars_core::{NetvarConfig, NetvarHandle, NetvarRegistry};
//! use netvars_host::LiveClassList;
//!
//! let classes = unsafe { LiveClassList::from_raw(client.get_all_classes())? };
//! let registry = NetvarRegistry::build(&classes, &NetvarConfig::default());
//!
//! let health = NetvarHandle::in_table(&registry, "m_iHealth", "CBasePlayer");
//! let fall = NetvarHandle::new(&registry, "CBasePlayer.m_Local.m_flFallVelocity");
//! println!("m_iHealth at {:#x}", health.offset());
//! ```
//!
//! # Performance
//!
//! - Registry build: one pass over every reachable host table
//! - First resolution of a path: one map lookup per segment
//! - Handle offset read: a field load

pub mod descriptor;
pub mod dump;
pub mod error;
pub mod handle;
pub mod path;
pub mod registry;
pub mod set;

// Re-export primary types
pub use descriptor::{ClassDescriptor, ClassId, Forest, ForestOptions, PropertyDescriptor};
pub use dump::{ClassDump, DumpError, ForestDump, PropDump, TableDump};
pub use error::{NetvarError, NetvarErrorKind};
pub use handle::{NetvarHandle, UNRESOLVED_OFFSET};
pub use registry::{LazyRegistry, NetvarRegistry};
pub use set::NetvarSet;
