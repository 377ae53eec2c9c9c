//! Schema Resolver - import merging followed by slot induction.
//!
//! Imports are followed depth-first. Each imported document is merged with
//! its own imports before it is folded into its importer:
//!
//! ```text
//! root.yaml ── imports ──► core.yaml ── imports ──► types.yaml
//!          └── imports ──► extra.yaml
//!
//! namespace(core)  = core  ⊕ types            (core wins)
//! imported(root)   = namespace(core) ◄ namespace(extra)   (later import wins)
//! namespace(root)  = root  ⊕ imported(root)   (root wins per policy)
//! ```
//!
//! [`ImportPrecedence`] only decides the last step. Below the root the
//! importing document always wins, so a closer definition is never replaced
//! by a farther one.
//!
//! Locators are canonicalized before anything is read; a document imported
//! twice is loaded once.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{LoadedSchema, SchemaSource},
    domain::{
        DomainError, ImportPrecedence, SchemaDefinition, SchemaDocument, is_builtin_import,
        materialize,
    },
    error::HarmonizerResult,
};

/// Resolves a schema locator into a [`SchemaDocument`].
///
/// Holds no state between calls: the import cache lives for one `resolve`.
pub struct SchemaResolver<'a> {
    source: &'a dyn SchemaSource,
    precedence: ImportPrecedence,
    interface_marker: Option<String>,
}

/// Per-run bookkeeping for the depth-first import walk.
#[derive(Default)]
struct ImportWalk {
    /// Canonical locators of documents currently being merged.
    stack: Vec<String>,
    /// Fully merged namespaces, by canonical locator.
    cache: HashMap<String, SchemaDefinition>,
}

impl<'a> SchemaResolver<'a> {
    pub fn new(source: &'a dyn SchemaSource) -> Self {
        Self {
            source,
            precedence: ImportPrecedence::default(),
            interface_marker: None,
        }
    }

    pub fn with_precedence(mut self, precedence: ImportPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Marker whose descendants get `implements_interface` set.
    pub fn with_interface_marker(mut self, marker: impl Into<String>) -> Self {
        self.interface_marker = Some(marker.into());
        self
    }

    /// Load, merge and materialize the schema at `locator`.
    #[instrument(skip(self), fields(precedence = %self.precedence))]
    pub fn resolve(&self, locator: &str) -> HarmonizerResult<SchemaDocument> {
        let merged = self.load_merged(locator)?;
        let document = materialize(merged, self.interface_marker.as_deref())?;

        info!(
            schema = %document.name(),
            classes = document.classes().len(),
            "Schema resolved"
        );
        Ok(document)
    }

    /// The single flat namespace of `locator` and everything it imports.
    pub fn load_merged(&self, locator: &str) -> HarmonizerResult<SchemaDefinition> {
        let canonical = self.source.locate(locator, None)?;
        let root = self.source.load(&canonical)?;
        debug!(locator = %root.locator, "Loaded root schema");

        let mut walk = ImportWalk::default();
        self.merge(root, &mut walk)
    }

    fn merge(&self, loaded: LoadedSchema, walk: &mut ImportWalk) -> HarmonizerResult<SchemaDefinition> {
        walk.stack.push(loaded.locator.clone());

        let mut imported = SchemaDefinition::default();
        for import in &loaded.definition.imports {
            if is_builtin_import(import) {
                debug!(import = %import, "Skipping built-in import");
                continue;
            }

            let namespace = self.import(import, &loaded.locator, walk)?;
            imported.overlay(namespace);
        }

        walk.stack.pop();

        let precedence = if walk.stack.is_empty() {
            self.precedence
        } else {
            ImportPrecedence::Local
        };
        let mut local = loaded.definition;
        local.absorb(imported, precedence);
        Ok(local)
    }

    fn import(
        &self,
        import: &str,
        importer: &str,
        walk: &mut ImportWalk,
    ) -> HarmonizerResult<SchemaDefinition> {
        let locator = self.source.locate(import, Some(importer))?;

        if let Some(start) = walk.stack.iter().position(|l| *l == locator) {
            let mut chain = walk.stack[start..].to_vec();
            chain.push(locator);
            return Err(DomainError::ImportCycle { chain }.into());
        }

        if let Some(cached) = walk.cache.get(&locator) {
            debug!(import = %locator, "Import already merged");
            return Ok(cached.clone());
        }

        debug!(import = %locator, importer = %importer, "Merging import");
        let child = self.source.load(&locator)?;
        let namespace = self.merge(child, walk)?;
        walk.cache.insert(locator, namespace.clone());
        Ok(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::{ClassDefinition, SlotDefinition};
    use crate::error::HarmonizerError;
    use std::sync::Mutex;

    /// In-memory documents keyed by locator; records every load.
    #[derive(Default)]
    struct Documents {
        docs: HashMap<String, SchemaDefinition>,
        loads: Mutex<Vec<String>>,
    }

    impl Documents {
        fn with(mut self, locator: &str, imports: &[&str], classes: &[(&str, Option<&str>)]) -> Self {
            let mut def = SchemaDefinition {
                name: locator.to_string(),
                imports: imports.iter().map(|s| s.to_string()).collect(),
                ..SchemaDefinition::default()
            };
            for (name, is_a) in classes {
                def.classes.insert(
                    name.to_string(),
                    ClassDefinition {
                        is_a: is_a.map(str::to_string),
                        ..ClassDefinition::default()
                    },
                );
            }
            self.docs.insert(locator.to_string(), def);
            self
        }

        fn load_count(&self, locator: &str) -> usize {
            self.loads.lock().unwrap().iter().filter(|l| *l == locator).count()
        }
    }

    impl SchemaSource for Documents {
        fn locate(&self, locator: &str, _base: Option<&str>) -> HarmonizerResult<String> {
            if self.docs.contains_key(locator) {
                Ok(locator.to_string())
            } else {
                Err(ApplicationError::SchemaNotFound {
                    locator: locator.to_string(),
                }
                .into())
            }
        }

        fn load(&self, canonical: &str) -> HarmonizerResult<LoadedSchema> {
            self.loads.lock().unwrap().push(canonical.to_string());
            Ok(LoadedSchema {
                locator: canonical.to_string(),
                definition: self.docs[canonical].clone(),
            })
        }
    }

    #[test]
    fn imported_classes_join_the_namespace() {
        let docs = Documents::default()
            .with("root", &["core"], &[("Sample", Some("dh_interface"))])
            .with("core", &["linkml:types"], &[("dh_interface", None)]);

        let doc = SchemaResolver::new(&docs)
            .with_interface_marker("dh_interface")
            .resolve("root")
            .unwrap();

        assert_eq!(doc.name(), "root");
        assert!(doc.contains_class("dh_interface"));
        assert!(doc.class("Sample").unwrap().implements_interface);
        assert!(doc.definition().imports.is_empty());
        assert_eq!(docs.load_count("linkml:types"), 0);
    }

    #[test]
    fn import_cycle_reports_chain() {
        let docs = Documents::default()
            .with("a", &["b"], &[])
            .with("b", &["c"], &[])
            .with("c", &["a"], &[]);

        let err = SchemaResolver::new(&docs).resolve("a").unwrap_err();
        assert_eq!(
            err,
            HarmonizerError::Domain(DomainError::ImportCycle {
                chain: vec!["a".into(), "b".into(), "c".into(), "a".into()]
            })
        );
    }

    #[test]
    fn self_import_is_a_cycle() {
        let docs = Documents::default().with("a", &["a"], &[]);
        assert!(matches!(
            SchemaResolver::new(&docs).resolve("a"),
            Err(HarmonizerError::Domain(DomainError::ImportCycle { .. }))
        ));
    }

    #[test]
    fn diamond_imports_merge_once() {
        let docs = Documents::default()
            .with("root", &["left", "right"], &[])
            .with("left", &["shared"], &[("Left", Some("Base"))])
            .with("right", &["shared"], &[("Right", Some("Base"))])
            .with("shared", &[], &[("Base", None)]);

        let doc = SchemaResolver::new(&docs).resolve("root").unwrap();

        let names: Vec<_> = doc.classes().keys().cloned().collect();
        assert_eq!(names.len(), 3);
        assert!(doc.class("Right").unwrap().descends_from("Base"));
        assert_eq!(docs.load_count("shared"), 1);
    }

    #[test]
    fn missing_import_is_a_load_error() {
        let docs = Documents::default().with("root", &["nowhere"], &[]);
        assert_eq!(
            SchemaResolver::new(&docs).resolve("root"),
            Err(HarmonizerError::Application(ApplicationError::SchemaNotFound {
                locator: "nowhere".into()
            }))
        );
    }

    fn ranged(locator: &str, imports: &[&str], range: &str) -> SchemaDefinition {
        let mut def = SchemaDefinition {
            name: locator.into(),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            ..SchemaDefinition::default()
        };
        def.slots
            .insert("id".into(), SlotDefinition::new("id").with_range(range));
        def
    }

    fn precedence_docs() -> Documents {
        let mut docs = Documents::default();
        docs.docs.insert("root".into(), ranged("root", &["first", "second"], "local"));
        docs.docs.insert("first".into(), ranged("first", &[], "first"));
        docs.docs.insert("second".into(), ranged("second", &[], "second"));
        docs
    }

    #[test]
    fn local_definitions_win_by_default() {
        let docs = precedence_docs();
        let merged = SchemaResolver::new(&docs).load_merged("root").unwrap();
        assert_eq!(merged.slots["id"].range.as_deref(), Some("local"));
    }

    #[test]
    fn import_precedence_lets_later_import_win() {
        let docs = precedence_docs();
        let merged = SchemaResolver::new(&docs)
            .with_precedence(ImportPrecedence::Import)
            .load_merged("root")
            .unwrap();
        assert_eq!(merged.slots["id"].range.as_deref(), Some("second"));
    }

    #[test]
    fn import_precedence_stops_at_the_root() {
        let mut docs = Documents::default();
        docs.docs.insert("root".into(), ranged("root", &["mid"], "local"));
        docs.docs.insert("mid".into(), ranged("mid", &["leaf"], "mid"));
        docs.docs.insert("leaf".into(), ranged("leaf", &[], "leaf"));

        let merged = SchemaResolver::new(&docs)
            .with_precedence(ImportPrecedence::Import)
            .load_merged("root")
            .unwrap();

        // mid beats root by policy; leaf never beats mid.
        assert_eq!(merged.slots["id"].range.as_deref(), Some("mid"));
    }

    #[test]
    fn cycle_is_detected_before_reloading() {
        let docs = Documents::default()
            .with("a", &["b"], &[])
            .with("b", &["a"], &[]);

        assert!(SchemaResolver::new(&docs).resolve("a").is_err());
        assert_eq!(docs.load_count("a"), 1);
    }
}
