//! Slot induction: turning a merged [`SchemaDefinition`] into a
//! [`SchemaDocument`] whose classes carry their complete attribute sets.
//!
//! For a class `C` with ancestors `A1` (nearest) .. `An` (farthest):
//!
//! ```text
//! attributes(C) = An ∪ .. ∪ A1 ∪ local(C)
//! ```
//!
//! applied left to right, so a nearer source replaces a farther one when
//! names collide. Each source contributes its `slots` (looked up among the
//! schema-level slots), then its inline `attributes`, then its `slot_usage`
//! refinements.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use super::{
    document::{ClassDef, SchemaDocument},
    model::{SchemaDefinition, SlotDefinition, is_builtin_import},
};
use crate::domain::error::DomainError;

/// Resolve every class of `definition`.
///
/// `definition` must already be merged: imports other than LinkML built-ins
/// are dropped from the result. The input is consumed; nothing is mutated in
/// place that a caller could still observe.
pub fn materialize(
    definition: SchemaDefinition,
    interface_marker: Option<&str>,
) -> Result<SchemaDocument, DomainError> {
    let mut classes = IndexMap::with_capacity(definition.classes.len());

    for name in definition.classes.keys() {
        let ancestors = ancestors(&definition, name)?;
        let attributes = induced_attributes(&definition, name, &ancestors)?;
        let implements_interface =
            interface_marker.is_some_and(|marker| ancestors.iter().any(|a| a == marker));

        classes.insert(
            name.clone(),
            ClassDef {
                name: name.clone(),
                ancestors,
                attributes,
                implements_interface,
            },
        );
    }

    let mut materialized = definition;
    materialized.imports.retain(|i| is_builtin_import(i));
    for (name, slot) in materialized.slots.iter_mut() {
        slot.name.clone_from(name);
    }
    for (name, class) in materialized.classes.iter_mut() {
        class.name.clone_from(name);
        if let Some(resolved) = classes.get(name) {
            class.attributes = resolved.attributes.clone();
        }
    }

    Ok(SchemaDocument::new(
        materialized,
        classes,
        interface_marker.map(str::to_string),
    ))
}

/// Ancestors of `class_name`, nearest first (breadth-first over `is_a` then
/// mixins), without duplicates and without the class itself.
pub fn ancestors(definition: &SchemaDefinition, class_name: &str) -> Result<Vec<String>, DomainError> {
    let class = definition
        .classes
        .get(class_name)
        .ok_or_else(|| DomainError::ClassNotInSchema {
            class: class_name.to_string(),
        })?;

    let mut found = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([class_name]);
    let mut queue: VecDeque<&str> = class.parents().collect();

    while let Some(parent) = queue.pop_front() {
        if parent == class_name {
            return Err(DomainError::InheritanceCycle {
                class: class_name.to_string(),
            });
        }
        if !seen.insert(parent) {
            continue;
        }

        let parent_def =
            definition
                .classes
                .get(parent)
                .ok_or_else(|| DomainError::UnknownAncestor {
                    class: class_name.to_string(),
                    ancestor: parent.to_string(),
                })?;

        found.push(parent.to_string());
        queue.extend(parent_def.parents());
    }

    Ok(found)
}

fn induced_attributes(
    definition: &SchemaDefinition,
    class_name: &str,
    ancestors: &[String],
) -> Result<IndexMap<String, SlotDefinition>, DomainError> {
    let mut attributes: IndexMap<String, SlotDefinition> = IndexMap::new();

    let chain = ancestors
        .iter()
        .rev()
        .map(String::as_str)
        .chain(std::iter::once(class_name));

    for source_name in chain {
        // Every name in the chain was checked by `ancestors`.
        let Some(source) = definition.classes.get(source_name) else {
            continue;
        };

        for slot_name in &source.slots {
            let slot = definition
                .slots
                .get(slot_name)
                .ok_or_else(|| DomainError::UnknownSlot {
                    class: source_name.to_string(),
                    slot: slot_name.clone(),
                })?;
            attributes.insert(slot_name.clone(), slot.clone().named(slot_name));
        }

        for (attr_name, attr) in &source.attributes {
            attributes.insert(attr_name.clone(), attr.clone().named(attr_name));
        }

        for (slot_name, usage) in &source.slot_usage {
            match attributes.get_mut(slot_name) {
                Some(existing) => existing.refine(usage),
                None => {
                    let mut slot = definition
                        .slots
                        .get(slot_name)
                        .cloned()
                        .unwrap_or_default()
                        .named(slot_name);
                    slot.refine(usage);
                    attributes.insert(slot_name.clone(), slot);
                }
            }
        }
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::model::ClassDefinition;

    fn class(is_a: Option<&str>, slots: &[&str]) -> ClassDefinition {
        ClassDefinition {
            is_a: is_a.map(str::to_string),
            slots: slots.iter().map(|s| s.to_string()).collect(),
            ..ClassDefinition::default()
        }
    }

    fn schema(classes: Vec<(&str, ClassDefinition)>, slots: &[&str]) -> SchemaDefinition {
        SchemaDefinition {
            name: "test".into(),
            classes: classes
                .into_iter()
                .map(|(n, c)| (n.to_string(), c))
                .collect(),
            slots: slots
                .iter()
                .map(|s| (s.to_string(), SlotDefinition::default()))
                .collect(),
            ..SchemaDefinition::default()
        }
    }

    fn attribute_names(doc: &SchemaDocument, class: &str) -> Vec<String> {
        doc.class(class).unwrap().attributes.keys().cloned().collect()
    }

    #[test]
    fn interface_scenario() {
        let def = schema(
            vec![
                ("Interface", class(None, &[])),
                ("Sample", class(Some("Interface"), &["id"])),
                ("Isolate", class(Some("Sample"), &["host"])),
            ],
            &["id", "host"],
        );

        let doc = materialize(def, Some("Interface")).unwrap();

        assert_eq!(attribute_names(&doc, "Isolate"), vec!["id", "host"]);
        assert_eq!(doc.class("Isolate").unwrap().ancestors, vec!["Sample", "Interface"]);
        assert!(doc.class("Sample").unwrap().implements_interface);
        assert!(doc.class("Isolate").unwrap().implements_interface);
        assert!(!doc.class("Interface").unwrap().implements_interface);
    }

    #[test]
    fn nearer_source_wins_on_collision() {
        let mut root = class(None, &[]);
        root.attributes
            .insert("id".into(), SlotDefinition::new("id").with_range("integer"));
        let mut middle = class(Some("Root"), &[]);
        middle
            .attributes
            .insert("id".into(), SlotDefinition::new("id").with_range("string"));
        let mut leaf = class(Some("Middle"), &[]);
        leaf.attributes
            .insert("id".into(), SlotDefinition::new("id").with_range("uri"));

        let def = schema(
            vec![("Root", root), ("Middle", middle), ("Leaf", leaf)],
            &[],
        );
        let doc = materialize(def, None).unwrap();

        let range = |c: &str| doc.class(c).unwrap().attributes["id"].range.clone();
        assert_eq!(range("Root").as_deref(), Some("integer"));
        assert_eq!(range("Middle").as_deref(), Some("string"));
        assert_eq!(range("Leaf").as_deref(), Some("uri"));
    }

    #[test]
    fn attribute_set_is_union_of_chain_and_local() {
        let mut leaf = class(Some("B"), &["c"]);
        leaf.attributes.insert("inline".into(), SlotDefinition::default());
        let def = schema(
            vec![
                ("A", class(None, &["a"])),
                ("B", class(Some("A"), &["b"])),
                ("Leaf", leaf),
            ],
            &["a", "b", "c"],
        );
        let doc = materialize(def, None).unwrap();

        assert_eq!(attribute_names(&doc, "Leaf"), vec!["a", "b", "c", "inline"]);
        for class in doc.classes().values() {
            for ancestor in &class.ancestors {
                for name in doc.class(ancestor).unwrap().attribute_names() {
                    assert!(class.attributes.contains_key(name), "{} lost {name}", class.name);
                }
            }
        }
    }

    #[test]
    fn mixins_contribute_slots() {
        let mut leaf = class(Some("Base"), &[]);
        leaf.mixins = vec!["Mix".into()];
        let def = schema(
            vec![
                ("Base", class(None, &["a"])),
                ("Mix", class(None, &["m"])),
                ("Leaf", leaf),
            ],
            &["a", "m"],
        );
        let doc = materialize(def, None).unwrap();

        assert_eq!(doc.class("Leaf").unwrap().ancestors, vec!["Base", "Mix"]);
        let mut names = attribute_names(&doc, "Leaf");
        names.sort();
        assert_eq!(names, vec!["a", "m"]);
    }

    #[test]
    fn slot_usage_refines_inherited_slot() {
        let mut leaf = class(Some("Base"), &[]);
        leaf.slot_usage.insert(
            "id".into(),
            SlotDefinition {
                required: Some(true),
                ..SlotDefinition::default()
            },
        );
        let mut def = schema(vec![("Base", class(None, &["id"])), ("Leaf", leaf)], &[]);
        def.slots
            .insert("id".into(), SlotDefinition::new("id").with_range("string"));

        let doc = materialize(def, None).unwrap();
        let id = &doc.class("Leaf").unwrap().attributes["id"];
        assert_eq!(id.required, Some(true));
        assert_eq!(id.range.as_deref(), Some("string"));
        assert_eq!(doc.class("Base").unwrap().attributes["id"].required, None);
    }

    #[test]
    fn unknown_ancestor_is_an_error() {
        let def = schema(vec![("Leaf", class(Some("Missing"), &[]))], &[]);
        assert_eq!(
            materialize(def, None),
            Err(DomainError::UnknownAncestor {
                class: "Leaf".into(),
                ancestor: "Missing".into(),
            })
        );
    }

    #[test]
    fn unknown_slot_is_an_error() {
        let def = schema(vec![("A", class(None, &["nope"]))], &[]);
        assert!(matches!(
            materialize(def, None),
            Err(DomainError::UnknownSlot { .. })
        ));
    }

    #[test]
    fn inheritance_cycle_is_an_error() {
        let def = schema(
            vec![("A", class(Some("B"), &[])), ("B", class(Some("A"), &[]))],
            &[],
        );
        assert!(matches!(
            materialize(def, None),
            Err(DomainError::InheritanceCycle { .. })
        ));
    }

    #[test]
    fn materialized_definition_keeps_only_builtin_imports() {
        let mut def = schema(vec![("A", class(None, &[]))], &[]);
        def.imports = vec!["linkml:types".into(), "core".into()];

        let doc = materialize(def, None).unwrap();
        assert_eq!(doc.definition().imports, vec!["linkml:types"]);
        assert_eq!(doc.definition().classes["A"].name, "A");
    }

    #[test]
    fn input_definition_is_not_modified() {
        let def = schema(
            vec![("A", class(None, &["a"])), ("B", class(Some("A"), &[]))],
            &["a"],
        );
        let before = def.clone();
        let doc = materialize(def.clone(), None).unwrap();

        assert_eq!(def, before);
        assert!(before.classes["B"].attributes.is_empty());
        assert_eq!(doc.definition().classes["B"].attributes.len(), 1);
    }
}
