//! netvars Proc Macros
//!
//! This crate provides `#[derive(Netvars)]`, which resolves a whole struct of
//! `NetvarHandle` fields against a registry in one call.
//!
//! # Example
//!
//! ```ignore
//! use netvars_core::{NetvarHandle, NetvarSet, Netvars};
//!
//! #[derive(Netvars)]
//! #[netvars(class = "CBasePlayer")]
//! pub struct PlayerNetvars {
//!     #[netvar(prop = "m_iHealth")]
//!     health: NetvarHandle,
//!
//!     #[netvar(prop = "m_flFallVelocity", table = "CBasePlayer.DT_Local")]
//!     fall_velocity: NetvarHandle,
//!
//!     #[netvar(path = "m_Local.m_vecPunchAngle")]
//!     punch_angle: NetvarHandle,
//! }
//!
//! let offsets = PlayerNetvars::resolve(&registry);
//! if !offsets.is_fully_resolved() {
//!     eprintln!("missing: {:?}", offsets.unresolved());
//! }
//! ```
//!
//! # Attributes
//!
//! ## Struct Attributes
//!
//! - `#[netvars(class = "ClassName")]` - Optional. Root class for every field.
//!
//! ## Field Attributes
//!
//! - `#[netvar(path = "prop.prop")]` - Chained lookup; offsets are summed.
//!   Prefixed with the struct's class when one is set.
//! - `#[netvar(prop = "m_name")]` - Lookup of one prop inside a table.
//! - `#[netvar(table = "Class.Table")]` - Full class path for `prop`.
//!   Defaults to the struct's class.

mod netvars;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for structs of netvar handles
///
/// Generates a `NetvarSet` implementation whose `resolve` builds every
/// handle from the registry, plus `CLASS_NAME` when a class is given.
///
/// # Generated Code
///
/// - `fn resolve(registry: &NetvarRegistry) -> Self`
/// - `fn handles(&self) -> Vec<(&'static str, NetvarHandle)>`
/// - `const CLASS_NAME: &'static str` (with `#[netvars(class = ...)]`)
#[proc_macro_derive(Netvars, attributes(netvars, netvar))]
pub fn derive_netvars(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    netvars::derive_netvars(input).into()
}
