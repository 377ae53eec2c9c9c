//! Serde model of a LinkML-style schema document.
//!
//! Only the parts of the metamodel that take part in import merging and slot
//! induction are typed. Everything else (types, enums, subsets, and any key
//! this model does not know about) is carried through untouched so that a
//! schema serialized after resolution loses nothing that was loaded.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Imports with this prefix name parts of the LinkML metamodel itself
/// (`linkml:types`, `linkml:units`, ...). They are never loaded.
pub const BUILTIN_IMPORT_PREFIX: &str = "linkml:";

/// Returns `true` for imports that refer to the LinkML metamodel.
pub fn is_builtin_import(import: &str) -> bool {
    import.starts_with(BUILTIN_IMPORT_PREFIX)
}

/// Root of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub prefixes: IndexMap<String, Value>,

    /// Import locators in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub classes: IndexMap<String, ClassDefinition>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub slots: IndexMap<String, SlotDefinition>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub types: IndexMap<String, Value>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub enums: IndexMap<String, Value>,

    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub subsets: IndexMap<String, Value>,

    /// Keys this model does not interpret.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A class node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixin: Option<bool>,

    /// Single parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,

    /// Names of schema-level slots used by this class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,

    /// Per-class refinements of slots the class already has.
    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub slot_usage: IndexMap<String, SlotDefinition>,

    /// Inline slots. After resolution this holds every induced slot.
    #[serde(
        default,
        deserialize_with = "nullable_map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub attributes: IndexMap<String, SlotDefinition>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ClassDefinition {
    /// Direct parents: `is_a` first, then mixins in declaration order.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.is_a
            .as_deref()
            .into_iter()
            .chain(self.mixins.iter().map(String::as_str))
    }
}

/// A slot, used both for schema-level slots and for class attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SlotDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Same definition stored under `name`.
    pub(crate) fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Apply a `slot_usage` entry: every field the usage sets wins.
    pub(crate) fn refine(&mut self, usage: &SlotDefinition) {
        fn take<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if source.is_some() {
                target.clone_from(source);
            }
        }

        take(&mut self.description, &usage.description);
        take(&mut self.title, &usage.title);
        take(&mut self.range, &usage.range);
        take(&mut self.required, &usage.required);
        take(&mut self.recommended, &usage.recommended);
        take(&mut self.multivalued, &usage.multivalued);
        take(&mut self.identifier, &usage.identifier);
        take(&mut self.pattern, &usage.pattern);
        for (key, value) in &usage.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Which side wins when an imported element and a root schema element share
/// a name. Nested imports always keep the importing document's definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPrecedence {
    /// The importing document keeps its own definition.
    #[default]
    Local,
    /// The imported definition replaces the local one.
    Import,
}

impl std::fmt::Display for ImportPrecedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Import => write!(f, "import"),
        }
    }
}

impl std::str::FromStr for ImportPrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "import" | "imported" => Ok(Self::Import),
            other => Err(format!(
                "unknown import precedence '{other}' (expected 'local' or 'import')"
            )),
        }
    }
}

impl SchemaDefinition {
    /// Layer `other` over `self`; `other` wins every name collision.
    ///
    /// Used to fold sibling imports together, so a later import replaces
    /// what an earlier one defined.
    pub fn overlay(&mut self, other: SchemaDefinition) {
        self.merge_elements(other, true);
    }

    /// Merge an imported namespace into this (importing) document.
    pub fn absorb(&mut self, imported: SchemaDefinition, precedence: ImportPrecedence) {
        self.merge_elements(imported, precedence == ImportPrecedence::Import);
    }

    fn merge_elements(&mut self, other: SchemaDefinition, overwrite: bool) {
        merge_map(&mut self.prefixes, other.prefixes, overwrite);
        merge_map(&mut self.classes, other.classes, overwrite);
        merge_map(&mut self.slots, other.slots, overwrite);
        merge_map(&mut self.types, other.types, overwrite);
        merge_map(&mut self.enums, other.enums, overwrite);
        merge_map(&mut self.subsets, other.subsets, overwrite);
    }

    /// Class names in declaration order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

fn merge_map<V>(target: &mut IndexMap<String, V>, source: IndexMap<String, V>, overwrite: bool) {
    for (key, value) in source {
        if overwrite || !target.contains_key(&key) {
            target.insert(key, value);
        }
    }
}

/// LinkML allows `name:` with an empty body for any element map entry.
fn nullable_map<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    let raw: Option<IndexMap<String, Option<V>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}
