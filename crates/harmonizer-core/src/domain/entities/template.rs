//! Project templates and the values they are rendered with.
//!
//! ```text
//! TemplateSet
//!  └── Vec<ProjectTemplate>
//!       ├── path: RelativePath     package.json.tpl
//!       └── text: TemplateText     {"name": "{{ project_name }}", ...}
//!
//! RenderContext { project_name, schema_name }
//! ```
//!
//! A template's output path is its path with the final extension removed:
//! `package.json.tpl` becomes `package.json`, `src/index.html.tpl` becomes
//! `src/index.html`. A path without an extension is written as-is.

use std::path::PathBuf;

use crate::domain::{
    artifacts::SCHEMAS_DIR,
    entities::common::RelativePath,
    error::DomainError,
};

/// The two values a template may reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    project_name: String,
    schema_name: String,
}

impl RenderContext {
    /// Placeholder names, as written between `{{` and `}}`.
    pub const VARIABLES: [&'static str; 2] = ["project_name", "schema_name"];

    pub fn new(project_name: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            schema_name: schema_name.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Value of a placeholder, `None` for names the context does not define.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "project_name" => Some(&self.project_name),
            "schema_name" => Some(&self.schema_name),
            _ => None,
        }
    }
}

/// Template text: either compiled into the binary or loaded at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateText {
    /// Compile-time string literal (e.g., `include_str!("package.json.tpl")`)
    Static(&'static str),

    /// Runtime-owned string (read from a template directory)
    Owned(String),
}

impl From<&'static str> for TemplateText {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateText {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateText {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    /// Quick check that lets renderers skip files without placeholders.
    pub fn contains_placeholder(&self) -> bool {
        let text = self.as_str();
        text.find("{{")
            .is_some_and(|open| text[open..].contains("}}"))
    }
}

/// One file of the project skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    path: RelativePath,
    text: TemplateText,
}

impl ProjectTemplate {
    pub fn new(path: RelativePath, text: impl Into<TemplateText>) -> Self {
        Self {
            path,
            text: text.into(),
        }
    }

    /// Fallible shorthand taking a plain string path.
    pub fn parse(path: &str, text: impl Into<TemplateText>) -> Result<Self, DomainError> {
        Ok(Self::new(RelativePath::try_new(path)?, text))
    }

    /// Path of the template inside its set.
    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn text(&self) -> &TemplateText {
        &self.text
    }

    /// Where the rendered file lands, relative to the project root.
    pub fn output_path(&self) -> RelativePath {
        let path = self.path.as_path();
        match (path.extension(), path.file_stem()) {
            (Some(_), Some(stem)) => {
                let stripped: PathBuf = path.with_file_name(stem);
                // Removing an extension cannot make a relative path absolute.
                RelativePath::try_new(stripped).unwrap_or_else(|_| self.path.clone())
            }
            _ => self.path.clone(),
        }
    }
}

/// Every template of one project skeleton, in the order they are rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    name: String,
    templates: Vec<ProjectTemplate>,
}

impl TemplateSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: Vec::new(),
        }
    }

    /// Human-readable origin, e.g. `builtin` or a directory path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, template: ProjectTemplate) {
        self.templates.push(template);
    }

    pub fn with_template(mut self, template: ProjectTemplate) -> Self {
        self.push(template);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// A set must be non-empty and leave the schema artifact directory to the
    /// artifact builder. Colliding output paths are reported by the renderer,
    /// which knows both template names.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.templates.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "template set '{}' contains no templates",
                self.name
            )));
        }

        for template in &self.templates {
            let output = template.output_path();
            if output.starts_with(SCHEMAS_DIR) {
                return Err(DomainError::InvalidTemplate(format!(
                    "{} would be written into {SCHEMAS_DIR}, which is reserved for schema artifacts",
                    template.path()
                )));
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a ProjectTemplate;
    type IntoIter = std::slice::Iter<'a, ProjectTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn output(path: &str) -> PathBuf {
        ProjectTemplate::parse(path, "")
            .unwrap()
            .output_path()
            .into_path_buf()
    }

    #[test]
    fn output_path_strips_final_extension() {
        assert_eq!(output("package.json.tpl"), Path::new("package.json"));
        assert_eq!(output("src/index.html.j2"), Path::new("src/index.html"));
        assert_eq!(output("webpack.config.js.tpl"), Path::new("webpack.config.js"));
        assert_eq!(output("README.md"), Path::new("README"));
    }

    #[test]
    fn output_path_without_extension_is_unchanged() {
        assert_eq!(output("LICENSE"), Path::new("LICENSE"));
        assert_eq!(output(".gitignore"), Path::new(".gitignore"));
        assert_eq!(output("src/Makefile"), Path::new("src/Makefile"));
    }

    #[test]
    fn context_exposes_exactly_two_variables() {
        let ctx = RenderContext::new("my-app", "mpox");
        assert_eq!(ctx.get("project_name"), Some("my-app"));
        assert_eq!(ctx.get("schema_name"), Some("mpox"));
        assert_eq!(ctx.get("PROJECT_NAME"), None);
        for var in RenderContext::VARIABLES {
            assert!(ctx.get(var).is_some());
        }
    }

    #[test]
    fn placeholder_detection() {
        assert!(TemplateText::from("{{ project_name }}").contains_placeholder());
        assert!(!TemplateText::from("}} before {{").contains_placeholder());
        assert!(!TemplateText::from(String::from("plain")).contains_placeholder());
    }

    #[test]
    fn set_validation_leaves_colliding_outputs_to_the_renderer() {
        let set = TemplateSet::new("t")
            .with_template(ProjectTemplate::parse("a.json.tpl", "").unwrap())
            .with_template(ProjectTemplate::parse("a.json.j2", "").unwrap());

        assert_eq!(set.validate(), Ok(()));
    }

    #[test]
    fn set_validation_reserves_schema_directory() {
        let set = TemplateSet::new("t")
            .with_template(ProjectTemplate::parse("src/schemas/x.json.tpl", "").unwrap());
        assert!(matches!(set.validate(), Err(DomainError::InvalidTemplate(_))));
    }

    #[test]
    fn empty_set_is_invalid() {
        assert!(TemplateSet::new("empty").validate().is_err());
    }
}
