//! Schema-derived artifacts written into the generated project.
//!
//! Two files end up under [`SCHEMAS_DIR`]:
//!
//! - `<schema_name>.json` - the resolved schema, attributes materialized
//! - `_menu.json` - which classes the project exposes as templates
//!
//! ```json
//! {
//!   "mpox": {
//!     "Isolate": { "name": "Isolate", "status": "published", "display": true }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::RelativePath, error::DomainError, schema::SchemaDocument,
    validation::DomainValidator,
};

/// Artifact directory, relative to the project root.
pub const SCHEMAS_DIR: &str = "src/schemas";

/// File name of the selection manifest.
pub const MENU_FILE_NAME: &str = "_menu.json";

/// The operator's answers for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelection {
    project_name: String,
    classes: Vec<String>,
}

impl ClassSelection {
    /// Duplicate class names are dropped; first occurrence keeps its place.
    pub fn new<I, S>(project_name: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for class in classes {
            let class = class.into();
            if !unique.contains(&class) {
                unique.push(class);
            }
        }
        Self {
            project_name: project_name.into(),
            classes: unique,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Publication state of a manifest entry. Only one state exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    #[default]
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub status: PublicationStatus,
    pub display: bool,
}

impl ManifestEntry {
    fn published(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: PublicationStatus::Published,
            display: true,
        }
    }
}

/// schema name → class name → entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionManifest(IndexMap<String, IndexMap<String, ManifestEntry>>);

impl SelectionManifest {
    /// Entries for `schema_name`, if present.
    pub fn classes(&self, schema_name: &str) -> Option<&IndexMap<String, ManifestEntry>> {
        self.0.get(schema_name)
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Two-space indented JSON, for human review.
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::SerializationFailed {
            artifact: MENU_FILE_NAME.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Both artifacts, serialized and ready to write.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub schema_name: String,
    pub serialized_schema: String,
    pub manifest: SelectionManifest,
    pub serialized_manifest: String,
    schema_path: RelativePath,
    manifest_path: RelativePath,
}

impl Artifacts {
    /// `src/schemas/<schema_name>.json`
    pub fn schema_path(&self) -> &RelativePath {
        &self.schema_path
    }

    /// `src/schemas/_menu.json`
    pub fn manifest_path(&self) -> &RelativePath {
        &self.manifest_path
    }
}

/// Produces [`Artifacts`] from a resolved schema and a selection.
pub struct ArtifactBuilder;

impl ArtifactBuilder {
    /// # Errors
    ///
    /// - [`DomainError::EmptySelection`] when nothing was selected
    /// - [`DomainError::ClassNotInSchema`] when a selected class is unknown
    /// - [`DomainError::InvalidSchemaName`] when the schema name is not a
    ///   plain file name
    pub fn build(
        schema: &SchemaDocument,
        selection: &ClassSelection,
    ) -> Result<Artifacts, DomainError> {
        DomainValidator::validate_selection(schema, selection)?;
        DomainValidator::validate_schema_name(schema.name())?;

        let schemas_dir = RelativePath::try_new(SCHEMAS_DIR)?;
        let schema_path = schemas_dir.join(format!("{}.json", schema.name()))?;
        let manifest_path = schemas_dir.join(MENU_FILE_NAME)?;

        let entries = selection
            .classes()
            .iter()
            .map(|c| (c.clone(), ManifestEntry::published(c)))
            .collect();
        let manifest = SelectionManifest(IndexMap::from([(schema.name().to_string(), entries)]));

        Ok(Artifacts {
            schema_name: schema.name().to_string(),
            serialized_schema: schema.to_json_pretty()?,
            serialized_manifest: manifest.to_json_pretty()?,
            manifest,
            schema_path,
            manifest_path,
        })
    }
}
