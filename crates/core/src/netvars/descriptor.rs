//! Class descriptor forest
//!
//! The forest mirrors the host's reflected tables. Descriptors live in a
//! slot arena and refer to their nested tables by [`ClassId`]; by default
//! every (parent, nested table) pair gets its own descriptor, exactly like
//! the host tree. With [`ForestOptions::share_nested_tables`] set, tables
//! with the same name occupy a single arena slot shared by index, and the
//! last declared table with that name fills it.

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{debug, trace};

use netvars_host::{HostClassSource, HostTable};

use super::error::NetvarError;
use crate::config::NetvarConfig;

slotmap::new_key_type! {
    /// Stable index of a class descriptor inside a [`Forest`]
    pub struct ClassId;
}

/// Offset and nested table of one reflected property
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    offset: i32,
    nested_table: String,
}

impl PropertyDescriptor {
    /// Byte offset relative to the declaring class
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Name of the nested table, empty for scalar leaves
    pub fn nested_table_name(&self) -> &str {
        &self.nested_table
    }

    /// Name of the nested table, if this property has one
    pub fn nested_table(&self) -> Option<&str> {
        (!self.nested_table.is_empty()).then_some(self.nested_table.as_str())
    }
}

/// Properties and nested tables of one reflected class
#[derive(Clone, Debug, Default)]
pub struct ClassDescriptor {
    name: String,
    properties: HashMap<String, PropertyDescriptor>,
    nested: HashMap<String, ClassId>,
}

impl ClassDescriptor {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// The host table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Result<&PropertyDescriptor, NetvarError> {
        self.properties
            .get(name)
            .ok_or_else(|| NetvarError::PropertyNotFound(name.to_string()))
    }

    /// Look up a nested table id by table name
    pub fn nested_id(&self, name: &str) -> Result<ClassId, NetvarError> {
        self.nested
            .get(name)
            .copied()
            .ok_or_else(|| NetvarError::SubclassNotFound(name.to_string()))
    }

    /// All properties, in no particular order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.properties.iter().map(|(name, prop)| (name.as_str(), prop))
    }

    /// Names of all nested tables, in no particular order
    pub fn nested_names(&self) -> impl Iterator<Item = &str> {
        self.nested.keys().map(String::as_str)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// Forest construction options
#[derive(Clone, Debug)]
pub struct ForestOptions {
    /// Property name the host uses for the base-class link
    pub baseclass_name: String,
    /// Store each table name once and share it between parents
    ///
    /// Every parent sees the last declared table of a given name, including
    /// parents built before it.
    pub share_nested_tables: bool,
}

impl Default for ForestOptions {
    fn default() -> Self {
        Self {
            baseclass_name: netvars_host::BASECLASS_PROP_NAME.to_string(),
            share_nested_tables: false,
        }
    }
}

impl From<&NetvarConfig> for ForestOptions {
    fn from(config: &NetvarConfig) -> Self {
        Self {
            baseclass_name: config.baseclass_name.clone(),
            share_nested_tables: config.share_nested_tables,
        }
    }
}

/// Every root class descriptor and everything reachable from them
///
/// Immutable once built.
#[derive(Debug, Default)]
pub struct Forest {
    classes: SlotMap<ClassId, ClassDescriptor>,
    roots: HashMap<String, ClassId>,
}

impl Forest {
    /// Walk the host's root classes once and expand every nested table
    ///
    /// The host data must be acyclic; a table that (transitively) contains
    /// itself recurses without bound.
    pub fn build<S: HostClassSource>(source: &S, options: &ForestOptions) -> Self {
        let mut builder = ForestBuilder {
            classes: SlotMap::with_key(),
            shared: HashMap::new(),
            options,
        };

        let mut roots = HashMap::new();
        for class in source.classes() {
            let id = builder.build_table(&class.table);
            roots.insert(class.name.into_owned(), id);
        }

        debug!(
            "Built netvar forest: {} root classes, {} class descriptors",
            roots.len(),
            builder.classes.len()
        );

        Self {
            classes: builder.classes,
            roots,
        }
    }

    /// Get a descriptor by id
    ///
    /// # Panics
    /// Panics if `id` was not produced by this forest.
    pub fn get(&self, id: ClassId) -> &ClassDescriptor {
        &self.classes[id]
    }

    /// Look up a root class by name
    pub fn root(&self, name: &str) -> Result<&ClassDescriptor, NetvarError> {
        self.roots
            .get(name)
            .map(|&id| &self.classes[id])
            .ok_or_else(|| NetvarError::ClassNotFound(name.to_string()))
    }

    /// Descend from `class` into its nested table `name`
    pub fn nested(
        &self,
        class: &ClassDescriptor,
        name: &str,
    ) -> Result<&ClassDescriptor, NetvarError> {
        class.nested_id(name).map(|id| &self.classes[id])
    }

    /// Names of all root classes, in no particular order
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Root classes with their descriptors
    pub fn roots(&self) -> impl Iterator<Item = (&str, &ClassDescriptor)> {
        self.roots
            .iter()
            .map(|(name, &id)| (name.as_str(), &self.classes[id]))
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of descriptors in the arena
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

struct ForestBuilder<'o> {
    classes: SlotMap<ClassId, ClassDescriptor>,
    shared: HashMap<String, ClassId>,
    options: &'o ForestOptions,
}

impl ForestBuilder<'_> {
    fn build_table<T: HostTable>(&mut self, table: &T) -> ClassId {
        let mut descriptor = ClassDescriptor::new(table.name().into_owned());
        for prop in table.props() {
            if prop.name == self.options.baseclass_name.as_str() {
                trace!("Skipping base class link in {}", descriptor.name);
                continue;
            }

            let nested_table = match &prop.data_table {
                Some(nested) => {
                    let id = self.build_table(nested);
                    let nested_name = self.classes[id].name.clone();
                    descriptor.nested.insert(nested_name.clone(), id);
                    nested_name
                }
                None => String::new(),
            };

            descriptor.properties.insert(
                prop.name.into_owned(),
                PropertyDescriptor {
                    offset: prop.offset,
                    nested_table,
                },
            );
        }

        if !self.options.share_nested_tables {
            return self.classes.insert(descriptor);
        }

        if let Some(&id) = self.shared.get(&descriptor.name) {
            trace!("Replacing shared table {}", descriptor.name);
            self.classes[id] = descriptor;
            return id;
        }

        let name = descriptor.name.clone();
        let id = self.classes.insert(descriptor);
        self.shared.insert(name, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netvars::dump::{ForestDump, TableDump};

    fn player_forest() -> ForestDump {
        let local = TableDump::new("LocalData").prop("velocity", 12);
        ForestDump::new().class(
            "Player",
            TableDump::new("DT_Player")
                .prop("health", 4)
                .nested("local", 20, local),
        )
    }

    #[test]
    fn test_build_player_forest() {
        let forest = Forest::build(&player_forest(), &ForestOptions::default());
        assert_eq!(forest.root_count(), 1);
        assert_eq!(forest.class_count(), 2);

        let player = forest.root("Player").unwrap();
        assert_eq!(player.name(), "DT_Player");
        assert_eq!(player.property("health").unwrap().offset(), 4);
        assert_eq!(player.property("health").unwrap().nested_table(), None);

        let local = player.property("local").unwrap();
        assert_eq!(local.offset(), 20);
        assert_eq!(local.nested_table(), Some("LocalData"));

        let nested = forest.nested(player, "LocalData").unwrap();
        assert_eq!(nested.property("velocity").unwrap().offset(), 12);
    }

    #[test]
    fn test_nested_table_invariant() {
        let forest = Forest::build(&player_forest(), &ForestOptions::default());
        for (_, class) in forest.roots() {
            for (_, prop) in class.properties() {
                if let Some(table) = prop.nested_table() {
                    assert!(class.nested_id(table).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_baseclass_is_never_stored_or_expanded() {
        let base = TableDump::new("DT_BaseEntity").prop("m_iTeamNum", 0x9c);
        let dump = ForestDump::new().class(
            "CBasePlayer",
            TableDump::new("DT_BasePlayer")
                .nested("baseclass", 0, base)
                .prop("m_iHealth", 0x100),
        );

        let forest = Forest::build(&dump, &ForestOptions::default());
        let player = forest.root("CBasePlayer").unwrap();
        assert_eq!(
            player.property("baseclass"),
            Err(NetvarError::PropertyNotFound("baseclass".into()))
        );
        assert!(player.nested_id("DT_BaseEntity").is_err());
        assert_eq!(player.property_count(), 1);
        assert_eq!(forest.class_count(), 1);
    }

    #[test]
    fn test_custom_baseclass_name() {
        let dump = ForestDump::new().class(
            "Player",
            TableDump::new("DT_Player")
                .prop("baseclass", 0)
                .nested("__super", 0, TableDump::new("DT_Base").prop("x", 1)),
        );
        let options = ForestOptions {
            baseclass_name: "__super".into(),
            ..ForestOptions::default()
        };

        let forest = Forest::build(&dump, &options);
        let player = forest.root("Player").unwrap();
        assert!(player.property("baseclass").is_ok());
        assert!(player.property("__super").is_err());
    }

    #[test]
    fn test_duplicates_resolve_to_last_declared() {
        let dump = ForestDump::new().class(
            "Player",
            TableDump::new("DT_Player")
                .prop("health", 4)
                .prop("health", 8)
                .nested("a", 16, TableDump::new("Shared").prop("x", 1))
                .nested("b", 32, TableDump::new("Shared").prop("x", 2)),
        );

        let forest = Forest::build(&dump, &ForestOptions::default());
        let player = forest.root("Player").unwrap();
        assert_eq!(player.property("health").unwrap().offset(), 8);

        let shared = forest.nested(player, "Shared").unwrap();
        assert_eq!(shared.property("x").unwrap().offset(), 2);
    }

    #[test]
    fn test_duplicate_root_classes_resolve_to_last_declared() {
        let dump = ForestDump::new()
            .class("Player", TableDump::new("DT_Old").prop("health", 4))
            .class("Player", TableDump::new("DT_New").prop("health", 8));

        let forest = Forest::build(&dump, &ForestOptions::default());
        assert_eq!(forest.root_count(), 1);
        let player = forest.root("Player").unwrap();
        assert_eq!(player.name(), "DT_New");
    }

    #[test]
    fn test_nested_tables_are_copied_per_parent_by_default() {
        let local = || TableDump::new("DT_Local").prop("m_flFallVelocity", 4);
        let dump = ForestDump::new()
            .class("A", TableDump::new("DT_A").nested("m_Local", 0, local()))
            .class("B", TableDump::new("DT_B").nested("m_Local", 0, local()));

        let forest = Forest::build(&dump, &ForestOptions::default());
        assert_eq!(forest.class_count(), 4);

        let a = forest.root("A").unwrap().nested_id("DT_Local").unwrap();
        let b = forest.root("B").unwrap().nested_id("DT_Local").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_share_nested_tables_reuses_descriptors() {
        let local = || TableDump::new("DT_Local").prop("m_flFallVelocity", 4);
        let dump = ForestDump::new()
            .class("A", TableDump::new("DT_A").nested("m_Local", 0, local()))
            .class("B", TableDump::new("DT_B").nested("m_Local", 0, local()));
        let options = ForestOptions {
            share_nested_tables: true,
            ..ForestOptions::default()
        };

        let forest = Forest::build(&dump, &options);
        assert_eq!(forest.class_count(), 3);

        let a = forest.root("A").unwrap().nested_id("DT_Local").unwrap();
        let b = forest.root("B").unwrap().nested_id("DT_Local").unwrap();
        assert_eq!(a, b);
        assert_eq!(forest.get(a).property("m_flFallVelocity").unwrap().offset(), 4);
    }

    #[test]
    fn test_shared_tables_resolve_to_last_declared() {
        let dump = ForestDump::new()
            .class(
                "A",
                TableDump::new("DT_A")
                    .nested("m_Local", 0, TableDump::new("DT_Local").prop("m_flFallVelocity", 4)),
            )
            .class(
                "B",
                TableDump::new("DT_B")
                    .nested("m_Local", 0, TableDump::new("DT_Local").prop("m_flFallVelocity", 8)),
            );
        let options = ForestOptions {
            share_nested_tables: true,
            ..ForestOptions::default()
        };

        let forest = Forest::build(&dump, &options);
        assert_eq!(forest.class_count(), 3);
        for root in ["A", "B"] {
            let class = forest.root(root).unwrap();
            let local = forest.nested(class, "DT_Local").unwrap();
            assert_eq!(local.property("m_flFallVelocity").unwrap().offset(), 8);
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = NetvarConfig {
            baseclass_name: "super".into(),
            share_nested_tables: true,
            ..NetvarConfig::default()
        };
        let options = ForestOptions::from(&config);
        assert_eq!(options.baseclass_name, "super");
        assert!(options.share_nested_tables);
    }
}
