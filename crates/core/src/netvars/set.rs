//! Groups of netvar handles resolved together
//!
//! Implemented by `#[derive(Netvars)]` for structs of [`NetvarHandle`] fields.

use super::handle::NetvarHandle;
use super::registry::NetvarRegistry;

/// A struct of handles that resolves all of its paths in one call
pub trait NetvarSet: Sized {
    /// Resolve every handle against the registry
    fn resolve(registry: &NetvarRegistry) -> Self;

    /// Every handle with its field name, in declaration order
    fn handles(&self) -> Vec<(&'static str, NetvarHandle)>;

    /// Field names of handles that failed to resolve
    fn unresolved(&self) -> Vec<&'static str> {
        self.handles()
            .into_iter()
            .filter(|(_, handle)| !handle.is_resolved())
            .map(|(name, _)| name)
            .collect()
    }

    /// Check if every handle resolved
    fn is_fully_resolved(&self) -> bool {
        self.handles().iter().all(|(_, handle)| handle.is_resolved())
    }
}
