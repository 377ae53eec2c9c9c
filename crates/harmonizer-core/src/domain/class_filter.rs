//! Candidate classes offered to the operator.

use serde::Serialize;

use crate::domain::schema::SchemaDocument;

/// Marker class used by DataHarmonizer schemas.
pub const DEFAULT_INTERFACE_MARKER: &str = "dh_interface";

/// One selectable class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCandidate {
    pub name: String,
    /// Pre-checked in the prompt: the class descends from the marker.
    pub default_selected: bool,
}

/// Every class except `interface_marker`, in declaration order.
///
/// A schema without the marker class is valid; nothing is pre-selected then.
pub fn candidates(schema: &SchemaDocument, interface_marker: &str) -> Vec<ClassCandidate> {
    let precomputed = schema.interface_marker() == Some(interface_marker);

    schema
        .classes()
        .values()
        .filter(|class| class.name != interface_marker)
        .map(|class| ClassCandidate {
            name: class.name.clone(),
            default_selected: if precomputed {
                class.implements_interface
            } else {
                class.descends_from(interface_marker)
            },
        })
        .collect()
}

/// Names of the candidates that start out selected.
pub fn default_selection(candidates: &[ClassCandidate]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| c.default_selected)
        .map(|c| c.name.clone())
        .collect()
}
