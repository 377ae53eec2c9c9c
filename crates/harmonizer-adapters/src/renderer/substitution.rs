//! Placeholder substitution renderer.
//!
//! Replaces `{{ project_name }}` and `{{ schema_name }}`; whitespace inside
//! the braces is optional. Any other `{{ ... }}` is left exactly as written,
//! so templates may carry braces meant for the generated project's own
//! tooling.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, instrument};

use harmonizer_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{ProjectStructure, RenderContext, TemplateSet},
    error::HarmonizerResult,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Renderer using plain placeholder substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionRenderer;

impl SubstitutionRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render one template text.
    pub fn render_str(&self, text: &str, context: &RenderContext) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                break;
            };

            out.push_str(&rest[..start]);
            let key = after_open[..end].trim();
            match context.get(key) {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..start + OPEN.len() + end + CLOSE.len()]),
            }
            rest = &after_open[end + CLOSE.len()..];
        }

        out.push_str(rest);
        out
    }
}

impl TemplateRenderer for SubstitutionRenderer {
    #[instrument(skip_all, fields(set = %templates.name()))]
    fn render(
        &self,
        templates: &TemplateSet,
        context: &RenderContext,
        output_root: &Path,
    ) -> HarmonizerResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);
        let mut sources = HashMap::new();

        for template in templates {
            let output = template.output_path();
            if let Some(earlier) = sources.insert(output.clone(), template.path()) {
                return Err(ApplicationError::RenderingFailed {
                    reason: format!(
                        "'{earlier}' and '{}' both render to '{output}'",
                        template.path()
                    ),
                }
                .into());
            }

            let text = template.text();
            let content = if text.contains_placeholder() {
                self.render_str(text.as_str(), context)
            } else {
                text.as_str().to_string()
            };

            debug!(template = %template.path(), output = %output, "Rendered template");
            structure.add_file(output, content);
        }

        Ok(structure)
    }
}
