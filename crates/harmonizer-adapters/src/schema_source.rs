//! Schema loading from YAML and JSON files.
//!
//! Import names are looked up next to the importing file. A name without an
//! extension is tried as-is first, then with each of [`SCHEMA_EXTENSIONS`]:
//!
//! ```text
//! schemas/mpox.yaml   imports: [core]
//!   → schemas/core, schemas/core.yaml, schemas/core.yml, schemas/core.json
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use harmonizer_core::{
    application::{
        ApplicationError,
        ports::{LoadedSchema, SchemaSource},
    },
    domain::SchemaDefinition,
    error::HarmonizerResult,
};

/// Extensions tried, in order, when a locator names no existing file.
pub const SCHEMA_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Reads schema documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSchemaSource;

impl FileSchemaSource {
    pub fn new() -> Self {
        Self
    }

    /// The file `locator` refers to, relative to the importing document.
    ///
    /// # Errors
    ///
    /// `ApplicationError::SchemaNotFound` when no candidate exists.
    pub fn find_file(&self, locator: &str, base: Option<&str>) -> HarmonizerResult<PathBuf> {
        let requested = match base.and_then(|b| Path::new(b).parent()) {
            Some(dir) => dir.join(locator),
            None => PathBuf::from(locator),
        };

        if requested.is_file() {
            return Ok(requested);
        }

        SCHEMA_EXTENSIONS
            .iter()
            .map(|ext| {
                let mut candidate = requested.clone().into_os_string();
                candidate.push(".");
                candidate.push(ext);
                PathBuf::from(candidate)
            })
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                ApplicationError::SchemaNotFound {
                    locator: requested.display().to_string(),
                }
                .into()
            })
    }
}

impl SchemaSource for FileSchemaSource {
    fn locate(&self, locator: &str, base: Option<&str>) -> HarmonizerResult<String> {
        let path = self.find_file(locator, base)?;
        let canonical = path
            .canonicalize()
            .map_err(|e| load_error(&path, e.to_string()))?;
        Ok(canonical.display().to_string())
    }

    #[instrument(skip(self))]
    fn load(&self, canonical: &str) -> HarmonizerResult<LoadedSchema> {
        let path = Path::new(canonical);
        let content =
            std::fs::read_to_string(path).map_err(|e| load_error(path, e.to_string()))?;
        let definition = parse(path, &content)?;

        debug!(
            path = %canonical,
            classes = definition.classes.len(),
            imports = definition.imports.len(),
            "Loaded schema document"
        );

        Ok(LoadedSchema {
            locator: canonical.to_string(),
            definition,
        })
    }
}

/// Parse by extension; anything else is sniffed (`{` means JSON).
fn parse(path: &Path, content: &str) -> HarmonizerResult<SchemaDefinition> {
    let is_json = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => true,
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => false,
        _ => content.trim_start().starts_with('{'),
    };

    let parsed: Result<SchemaDefinition, String> = if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| load_error(path, reason).into())
}

fn load_error(path: &Path, reason: String) -> ApplicationError {
    ApplicationError::SchemaLoad {
        locator: path.display().to_string(),
        reason,
    }
}
