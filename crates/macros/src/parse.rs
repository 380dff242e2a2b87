//! Attribute parsing for the Netvars derive macro

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Ident};

/// Parsed #[netvars(...)] attributes on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(netvars), supports(struct_named))]
pub struct NetvarsArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct fields
    pub data: darling::ast::Data<(), NetvarFieldArgs>,

    /// Root class prefixed to every field path (e.g., "CBasePlayer")
    #[darling(default, rename = "class")]
    pub class_name: Option<String>,
}

/// Parsed #[netvar(...)] attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(netvar))]
pub struct NetvarFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Chained property path, relative to the struct's class if one is set
    #[darling(default)]
    pub path: Option<String>,

    /// Property name looked up inside `table`
    #[darling(default)]
    pub prop: Option<String>,

    /// Dotted class path holding `prop` (defaults to the struct's class)
    #[darling(default)]
    pub table: Option<String>,
}

/// How a field resolves its handle
pub enum FieldLookup {
    /// `NetvarHandle::new(registry, path)`
    Chained { path: String },
    /// `NetvarHandle::in_table(registry, prop, table)`
    Scoped { prop: String, table: String },
}

impl NetvarFieldArgs {
    /// Decide the lookup for this field, given the struct's class
    pub fn lookup(&self, class_name: Option<&str>) -> darling::Result<FieldLookup> {
        match (&self.path, &self.prop) {
            (Some(path), None) => {
                if self.table.is_some() {
                    return Err(darling::Error::custom(
                        "`table` only applies to `prop` lookups",
                    ));
                }
                let path = match class_name {
                    Some(class) => format!("{}.{}", class, path),
                    None => path.clone(),
                };
                Ok(FieldLookup::Chained { path })
            }
            (None, Some(prop)) => {
                let table = self
                    .table
                    .as_deref()
                    .or(class_name)
                    .ok_or_else(|| {
                        darling::Error::custom(
                            "`prop` needs a `table` or a struct-level #[netvars(class = ...)]",
                        )
                    })?;
                Ok(FieldLookup::Scoped {
                    prop: prop.clone(),
                    table: table.to_string(),
                })
            }
            (Some(_), Some(_)) => Err(darling::Error::custom(
                "use either `path` or `prop`, not both",
            )),
            (None, None) => Err(darling::Error::custom(
                "missing #[netvar(path = ...)] or #[netvar(prop = ...)]",
            )),
        }
    }
}

/// Parse a DeriveInput into NetvarsArgs
pub fn parse_netvars(input: &DeriveInput) -> darling::Result<NetvarsArgs> {
    NetvarsArgs::from_derive_input(input)
}
