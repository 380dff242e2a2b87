//! netvars SDK - Source Engine Networked Class Type Definitions
//!
//! This crate contains the raw `#[repr(C)]` layouts the client DLL uses to
//! describe its networked classes. It has no dependencies and compiles
//! quickly, allowing parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`client_class`] - The `ClientClass` linked list exported by the client
//! - [`recv`] - `RecvTable` / `RecvProp` receive-side property tables

pub mod client_class;
pub mod recv;

pub use client_class::*;
pub use recv::*;

/// Name the engine gives the pseudo-property linking a table to its base class
pub const BASECLASS_PROP_NAME: &str = "baseclass";
