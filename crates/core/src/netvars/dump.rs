//! Forest snapshots in JSON
//!
//! A dump is a host-independent copy of the class tree. It doubles as an
//! offline host: [`ForestDump`] implements [`HostClassSource`], so a registry
//! can be rebuilt from a saved file and offsets diffed across game updates.

use std::borrow::Cow;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use netvars_host::{HostClass, HostClassSource, HostProp, HostTable};

use super::descriptor::{ClassDescriptor, Forest};

/// Errors that can occur when loading or saving a dump
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Failed to access dump file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse dump JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Snapshot of every root class
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestDump {
    #[serde(default)]
    pub classes: Vec<ClassDump>,
}

/// One root class and its table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassDump {
    pub name: String,
    pub table: TableDump,
}

/// One table with its props in declaration order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDump {
    pub name: String,
    #[serde(default)]
    pub props: Vec<PropDump>,
}

/// One prop; `table` is set for props that refer to a nested table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropDump {
    pub name: String,
    pub offset: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableDump>,
}

impl ForestDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a root class
    pub fn class(mut self, name: impl Into<String>, table: TableDump) -> Self {
        self.classes.push(ClassDump {
            name: name.into(),
            table,
        });
        self
    }

    /// Load a dump from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load a dump from a JSON string
    pub fn load_from_str(json: &str) -> Result<Self, DumpError> {
        let dump: Self = serde_json::from_str(json)?;
        debug!("Loaded netvar dump with {} classes", dump.classes.len());
        Ok(dump)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save as pretty-printed JSON, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DumpError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        debug!("Saved netvar dump to {:?}", path);
        Ok(())
    }
}

impl TableDump {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: Vec::new(),
        }
    }

    /// Append a scalar prop
    pub fn prop(mut self, name: impl Into<String>, offset: i32) -> Self {
        self.props.push(PropDump {
            name: name.into(),
            offset,
            table: None,
        });
        self
    }

    /// Append a prop referring to a nested table
    pub fn nested(mut self, name: impl Into<String>, offset: i32, table: TableDump) -> Self {
        self.props.push(PropDump {
            name: name.into(),
            offset,
            table: Some(table),
        });
        self
    }
}

impl<'t> HostTable for &'t TableDump {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn props(&self) -> impl Iterator<Item = HostProp<'_, Self>> + '_ {
        let table: &'t TableDump = *self;
        table.props.iter().map(|prop| HostProp {
            name: Cow::Borrowed(prop.name.as_str()),
            offset: prop.offset,
            data_table: prop.table.as_ref(),
        })
    }
}

impl HostClassSource for ForestDump {
    type Table<'a> = &'a TableDump
    where
        Self: 'a;

    fn classes(&self) -> impl Iterator<Item = HostClass<'_, Self::Table<'_>>> + '_ {
        self.classes.iter().map(|class| HostClass {
            name: Cow::Borrowed(class.name.as_str()),
            table: &class.table,
        })
    }
}

impl Forest {
    /// Export the forest as a dump
    ///
    /// Host declaration order is not retained: classes and props come out
    /// sorted by name, and base-class links are absent.
    pub fn to_dump(&self) -> ForestDump {
        let mut classes: Vec<_> = self
            .roots()
            .map(|(name, class)| ClassDump {
                name: name.to_string(),
                table: self.export_table(class),
            })
            .collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        ForestDump { classes }
    }

    fn export_table(&self, class: &ClassDescriptor) -> TableDump {
        let mut props: Vec<_> = class
            .properties()
            .map(|(name, prop)| PropDump {
                name: name.to_string(),
                offset: prop.offset(),
                table: prop
                    .nested_table()
                    .and_then(|table| self.nested(class, table).ok())
                    .map(|nested| self.export_table(nested)),
            })
            .collect();
        props.sort_by(|a, b| a.name.cmp(&b.name));

        TableDump {
            name: class.name().to_string(),
            props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netvars::descriptor::ForestOptions;

    const PLAYER_JSON: &str = r#"{
        "classes": [
            {
                "name": "CBasePlayer",
                "table": {
                    "name": "DT_BasePlayer",
                    "props": [
                        { "name": "baseclass", "offset": 0, "table": { "name": "DT_BaseEntity" } },
                        { "name": "m_iHealth", "offset": 256 },
                        {
                            "name": "m_Local",
                            "offset": 252,
                            "table": {
                                "name": "DT_Local",
                                "props": [{ "name": "m_flFallVelocity", "offset": 104 }]
                            }
                        }
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_load_from_str() {
        let dump = ForestDump::load_from_str(PLAYER_JSON).unwrap();
        assert_eq!(dump.classes.len(), 1);
        assert_eq!(dump.classes[0].name, "CBasePlayer");

        let props = &dump.classes[0].table.props;
        assert_eq!(props.len(), 3);
        assert_eq!(props[1].offset, 256);
        assert_eq!(props[2].table.as_ref().unwrap().name, "DT_Local");
        assert!(props[0].table.as_ref().unwrap().props.is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let result = ForestDump::load_from_str(r#"{ "classes": [ { "name": 5 } ] }"#);
        assert!(matches!(result, Err(DumpError::ParseError(_))));
    }

    #[test]
    fn test_dump_acts_as_host_source() {
        let dump = ForestDump::load_from_str(PLAYER_JSON).unwrap();
        let classes: Vec<_> = dump.classes().collect();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].table.name(), "DT_BasePlayer");

        let props: Vec<_> = classes[0].table.props().collect();
        assert_eq!(props[2].name, "m_Local");
        assert_eq!(props[2].data_table.map(|t| t.name.as_str()), Some("DT_Local"));
    }

    #[test]
    fn test_forest_export_drops_baseclass_and_sorts() {
        let dump = ForestDump::load_from_str(PLAYER_JSON).unwrap();
        let forest = Forest::build(&dump, &ForestOptions::default());
        let exported = forest.to_dump();

        let expected = ForestDump::new().class(
            "CBasePlayer",
            TableDump::new("DT_BasePlayer")
                .nested(
                    "m_Local",
                    252,
                    TableDump::new("DT_Local").prop("m_flFallVelocity", 104),
                )
                .prop("m_iHealth", 256),
        );
        assert_eq!(exported, expected);
    }

    #[test]
    fn test_exported_dump_rebuilds_same_offsets() {
        let dump = ForestDump::load_from_str(PLAYER_JSON).unwrap();
        let forest = Forest::build(&dump, &ForestOptions::default());
        let json = forest.to_dump().to_json_pretty().unwrap();

        let reloaded = ForestDump::load_from_str(&json).unwrap();
        let rebuilt = Forest::build(&reloaded, &ForestOptions::default());
        assert_eq!(
            rebuilt.resolve("CBasePlayer.m_Local.m_flFallVelocity"),
            Ok(252 + 104)
        );
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("netvars-dump-{}", std::process::id()));
        let path = dir.join("netvars.json");

        let dump = ForestDump::new().class(
            "CWorld",
            TableDump::new("DT_World").prop("m_flWaveHeight", 8),
        );
        dump.save_to_file(&path).unwrap();
        let loaded = ForestDump::load_from_file(&path).unwrap();
        assert_eq!(loaded, dump);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ForestDump::load_from_file("/nonexistent/netvars.json");
        assert!(matches!(result, Err(DumpError::IoError(_))));
    }
}
