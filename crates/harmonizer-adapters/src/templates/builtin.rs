//! The DataHarmonizer project skeleton shipped inside the binary.
//!
//! Files live under `crates/harmonizer-adapters/templates/` and are embedded
//! with `include_str!`, so the binary works without any template directory
//! next to it.

use tracing::instrument;

use harmonizer_core::{
    application::ports::TemplateSource,
    domain::{ProjectTemplate, TemplateSet},
    error::HarmonizerResult,
};

/// Name reported for the embedded set.
pub const BUILTIN_SET_NAME: &str = "builtin";

const FILES: &[(&str, &str)] = &[
    ("package.json.tpl", include_str!("../../templates/package.json.tpl")),
    ("README.md.tpl", include_str!("../../templates/README.md.tpl")),
    (".gitignore.tpl", include_str!("../../templates/.gitignore.tpl")),
    (
        "webpack.config.js.tpl",
        include_str!("../../templates/webpack.config.js.tpl"),
    ),
    ("src/index.html.tpl", include_str!("../../templates/src/index.html.tpl")),
    ("src/index.js.tpl", include_str!("../../templates/src/index.js.tpl")),
];

/// Compiled-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for BuiltinTemplates {
    #[instrument(skip_all)]
    fn templates(&self) -> HarmonizerResult<TemplateSet> {
        let mut set = TemplateSet::new(BUILTIN_SET_NAME);
        for (path, text) in FILES {
            set.push(ProjectTemplate::parse(path, *text)?);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs() -> Vec<String> {
        BuiltinTemplates
            .templates()
            .unwrap()
            .iter()
            .map(|t| t.output_path().to_string())
            .collect()
    }

    #[test]
    fn builtin_set_is_valid() {
        let set = BuiltinTemplates.templates().unwrap();
        assert_eq!(set.name(), BUILTIN_SET_NAME);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn builtin_outputs_strip_template_extension() {
        let outputs = outputs();
        for expected in ["package.json", ".gitignore", "src/index.js", "src/index.html"] {
            assert!(outputs.iter().any(|o| o == expected), "missing {expected}");
        }
        assert!(outputs.iter().all(|o| !o.ends_with(".tpl")));
    }

    #[test]
    fn package_json_uses_project_name() {
        let set = BuiltinTemplates.templates().unwrap();
        let package = set
            .iter()
            .find(|t| t.output_path().to_string() == "package.json")
            .unwrap();
        assert!(package.text().as_str().contains("{{ project_name }}"));
    }
}
