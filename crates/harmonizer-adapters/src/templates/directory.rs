//! Filesystem-based template source.
//!
//! Every regular file below the directory is one template; its path relative
//! to the directory is the template path:
//!
//! ```text
//! my-skeleton/
//! ├── package.json.tpl      → package.json
//! ├── .gitignore.tpl        → .gitignore
//! └── src/
//!     └── index.js.tpl      → src/index.js
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use harmonizer_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::{ProjectTemplate, RelativePath, TemplateSet},
    error::HarmonizerResult,
};

/// Templates read from a user-supplied directory at run time.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// The directory does not need to exist yet; [`TemplateSource::templates`]
    /// fails if it is missing when called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn error(&self, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::TemplateLoad {
            origin: self.root.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn templates(&self) -> HarmonizerResult<TemplateSet> {
        if !self.root.is_dir() {
            return Err(self.error("not a directory").into());
        }

        let mut set = TemplateSet::new(self.root.display().to_string());

        // Sorted so the render order does not depend on the platform.
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| self.error(format!("directory walk error: {e}")))?;

            // Skip directories, symlinks and other special types.
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).map_err(|_| {
                self.error(format!(
                    "failed to relativise '{}'",
                    entry.path().display()
                ))
            })?;
            let path = RelativePath::try_new(normalize_path(relative))?;

            let text = fs::read_to_string(entry.path())
                .map_err(|e| self.error(format!("failed to read '{path}': {e}")))?;

            debug!(template = %path, "Loaded template");
            set.push(ProjectTemplate::new(path, text));
        }

        debug!(count = set.len(), "Finished loading templates");
        Ok(set)
    }
}

/// Forward slashes, so paths compare identically on every platform.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
