//! C-compatible exports and the registry they share

pub mod exports;
