//! netvars - Core Logic
//!
//! This crate resolves symbolic property paths such as
//! `"CBasePlayer.m_Local.m_vecVelocity"` into byte offsets inside a host's
//! networked class tables.
//!
//! # Re-exports
//!
//! This crate re-exports the host crate and the derive macro for convenience:
//! - [`host`] - Host traversal traits and the live `ClientClass` walker
//! - [`Netvars`] - `#[derive(Netvars)]` for structs of handles

// Allow the crate to refer to itself as `netvars_core` for proc macro compatibility
extern crate self as netvars_core;

pub use netvars_host as host;
pub use netvars_macros::Netvars;

pub mod config;
pub mod netvars;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, NetvarConfig};
pub use netvars::{
    ForestDump, LazyRegistry, NetvarError, NetvarErrorKind, NetvarHandle, NetvarRegistry,
    NetvarSet, TableDump, UNRESOLVED_OFFSET,
};
