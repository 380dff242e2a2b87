//! Error types for host table access

/// Error type for reading the host's class tables
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A required pointer handed over by the host was null
    #[error("Null pointer: {0}")]
    NullPointer(&'static str),
}
