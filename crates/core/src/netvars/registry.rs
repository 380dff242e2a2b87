//! Netvar registry - the built forest plus a resolution memo
//!
//! The registry owns an immutable [`Forest`] and exposes both path shapes.
//! Successful resolutions are memoized in `DashMap`s keyed by the path
//! strings themselves, so repeated lookups from many handles skip the tree
//! walk. Probes borrow the caller's `&str` and never allocate.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::OnceLock;

use dashmap::DashMap;
use tracing::{debug, info, trace};

use netvars_host::HostClassSource;

use super::descriptor::{ClassDescriptor, Forest, ForestOptions};
use super::dump::ForestDump;
use super::error::NetvarError;
use crate::config::NetvarConfig;

/// Owner of the descriptor forest
///
/// Construct once at startup and pass by reference to every
/// [`NetvarHandle`](super::NetvarHandle) constructor.
pub struct NetvarRegistry {
    forest: Forest,
    cache_enabled: bool,
    /// Chained path -> summed offset
    chained: DashMap<String, i32>,
    /// Class path -> prop -> offset
    scoped: DashMap<String, HashMap<String, i32>>,
}

impl NetvarRegistry {
    /// Walk the host's class list and build the forest
    pub fn build<S: HostClassSource>(source: &S, config: &NetvarConfig) -> Self {
        let forest = Forest::build(source, &ForestOptions::from(config));
        info!(
            "Netvar registry ready: {} classes ({} descriptors)",
            forest.root_count(),
            forest.class_count()
        );
        Self::from_forest(forest, config.cache_resolutions)
    }

    /// Wrap an already built forest
    pub fn from_forest(forest: Forest, cache_enabled: bool) -> Self {
        Self {
            forest,
            cache_enabled,
            chained: DashMap::new(),
            scoped: DashMap::new(),
        }
    }

    /// Resolve a chained property path (`Class.prop.prop`), summing offsets
    pub fn resolve(&self, full_path: &str) -> Result<i32, NetvarError> {
        if !self.cache_enabled {
            return self.forest.resolve(full_path);
        }

        if let Some(offset) = self.chained.get(full_path) {
            trace!("Cache hit for {}: offset={}", full_path, *offset);
            return Ok(*offset);
        }

        let offset = self.forest.resolve(full_path)?;
        debug!("Resolved {}: offset={:#x}", full_path, offset);
        self.chained.insert(full_path.to_string(), offset);
        Ok(offset)
    }

    /// Resolve `prop` inside a dotted class path (`Class.Table.Table`)
    pub fn resolve_in(&self, prop: &str, class_path: &str) -> Result<i32, NetvarError> {
        if !self.cache_enabled {
            return self.forest.resolve_in(prop, class_path);
        }

        let cached = self
            .scoped
            .get(class_path)
            .and_then(|props| props.get(prop).copied());
        if let Some(offset) = cached {
            trace!("Cache hit for {} in {}: offset={}", prop, class_path, offset);
            return Ok(offset);
        }

        let offset = self.forest.resolve_in(prop, class_path)?;
        debug!("Resolved {} in {}: offset={:#x}", prop, class_path, offset);
        self.scoped
            .entry(class_path.to_string())
            .or_default()
            .insert(prop.to_string(), offset);
        Ok(offset)
    }

    /// Resolve a batch of chained paths
    ///
    /// Useful during startup to surface schema mismatches early.
    pub fn prefetch(&self, paths: &[&str]) -> Vec<Result<i32, NetvarError>> {
        paths.iter().map(|path| self.resolve(path)).collect()
    }

    /// Look up a class descriptor by dotted class path
    pub fn class(&self, class_path: &str) -> Result<&ClassDescriptor, NetvarError> {
        self.forest.class(class_path)
    }

    /// Names of all root classes, sorted
    pub fn root_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.forest.root_names().collect();
        names.sort_unstable();
        names
    }

    /// The underlying forest
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Export the forest as a dump
    pub fn dump(&self) -> ForestDump {
        self.forest.to_dump()
    }

    /// Number of memoized resolutions
    pub fn cache_size(&self) -> usize {
        self.chained.len()
            + self
                .scoped
                .iter()
                .map(|props| props.value().len())
                .sum::<usize>()
    }

    /// Drop all memoized resolutions
    pub fn clear_cache(&self) {
        self.chained.clear();
        self.scoped.clear();
        debug!("Netvar resolution cache cleared");
    }
}

/// A registry built on first access
///
/// The build closure runs exactly once; concurrent first callers block until
/// it completes. Usable in statics with a non-capturing closure:
///
/// ```ignore
/// static NETVARS: LazyRegistry = LazyRegistry::new(|| {
///     let dump = ForestDump::load_from_file("netvars.json").unwrap_or_default();
///     NetvarRegistry::build(&dump, &NetvarConfig::default())
/// });
/// ```
pub struct LazyRegistry<F = fn() -> NetvarRegistry> {
    cell: OnceLock<NetvarRegistry>,
    init: F,
}

impl<F: Fn() -> NetvarRegistry> LazyRegistry<F> {
    pub const fn new(init: F) -> Self {
        Self {
            cell: OnceLock::new(),
            init,
        }
    }

    /// Get the registry, building it on first call
    pub fn get(&self) -> &NetvarRegistry {
        self.cell.get_or_init(|| {
            debug!("Building netvar registry on first access");
            (self.init)()
        })
    }

    /// Check if the registry has been built
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<F: Fn() -> NetvarRegistry> Deref for LazyRegistry<F> {
    type Target = NetvarRegistry;

    fn deref(&self) -> &NetvarRegistry {
        self.get()
    }
}
