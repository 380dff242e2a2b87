//! netvars Plugin - FFI Layer
//!
//! This crate provides the C ABI boundary between a native host module and
//! the Rust resolver. It compiles to a cdylib (.so/.dll).
//!
//! The library API in `netvars-core` takes the registry by reference; this
//! crate owns the single process-wide registry a C caller needs.

pub mod ffi;
