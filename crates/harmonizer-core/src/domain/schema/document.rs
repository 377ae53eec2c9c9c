//! The resolved, immutable view of a schema.

use indexmap::IndexMap;

use super::model::{SchemaDefinition, SlotDefinition};
use crate::domain::error::DomainError;

/// A class after inheritance resolution.
///
/// `attributes` is complete: no further ancestor lookups are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// Nearest first; never contains the class itself.
    pub ancestors: Vec<String>,
    pub attributes: IndexMap<String, SlotDefinition>,
    /// The interface marker used at resolution time appears in `ancestors`.
    pub implements_interface: bool,
}

impl ClassDef {
    pub fn descends_from(&self, class_name: &str) -> bool {
        self.ancestors.iter().any(|a| a == class_name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// Merged, import-free schema with every class's attributes materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    definition: SchemaDefinition,
    classes: IndexMap<String, ClassDef>,
    interface_marker: Option<String>,
}

impl SchemaDocument {
    pub(crate) fn new(
        definition: SchemaDefinition,
        classes: IndexMap<String, ClassDef>,
        interface_marker: Option<String>,
    ) -> Self {
        Self {
            definition,
            classes,
            interface_marker,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The materialized definition, as it is serialized.
    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    /// Classes keyed by name, in declaration order.
    pub fn classes(&self) -> &IndexMap<String, ClassDef> {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Marker the `implements_interface` flags were computed against.
    pub fn interface_marker(&self) -> Option<&str> {
        self.interface_marker.as_deref()
    }

    /// Loss-less pretty JSON of the materialized definition.
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(&self.definition).map_err(|e| {
            DomainError::SerializationFailed {
                artifact: format!("{}.json", self.name()),
                reason: e.to_string(),
            }
        })
    }
}
