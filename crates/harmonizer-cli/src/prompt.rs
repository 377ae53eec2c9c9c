//! [`OperatorPrompt`] implementations.
//!
//! - [`PresetPrompt`]: answers from flags (`--name`, `--class`, `--yes`)
//! - [`InteractivePrompt`]: terminal dialogs, behind the `interactive` feature

use tracing::debug;

use harmonizer_core::{
    application::ports::{OperatorPrompt, PromptRequest},
    domain::{ClassSelection, default_selection},
    error::HarmonizerResult,
};

pub const NAME_QUESTION: &str = "What would you like your new project to be called?";
pub const CLASS_QUESTION: &str = "The following classes were found in the provided schema. \
                                  Which should be used as DataHarmonizer templates?";

/// The project name ends up as the npm package name and a directory name.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name cannot be empty".into());
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err("name cannot start with '.' or '_'".into());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("name cannot contain path separators".into());
    }
    if name.chars().any(char::is_whitespace) {
        return Err("name cannot contain whitespace".into());
    }
    Ok(())
}

/// Answers fixed before the run starts.
///
/// A missing name falls back to the request's default; missing classes fall
/// back to the default-selected candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetPrompt {
    name: Option<String>,
    classes: Vec<String>,
}

impl PresetPrompt {
    pub fn new(name: Option<String>, classes: Vec<String>) -> Self {
        Self { name, classes }
    }
}

impl OperatorPrompt for PresetPrompt {
    fn ask(&self, request: &PromptRequest) -> HarmonizerResult<ClassSelection> {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| request.default_project_name.clone());

        let classes = if self.classes.is_empty() {
            default_selection(&request.candidates)
        } else {
            self.classes.clone()
        };

        debug!(project = %name, classes = ?classes, "Using preset answers");
        Ok(ClassSelection::new(name, classes))
    }
}

#[cfg(feature = "interactive")]
pub use interactive::InteractivePrompt;

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Input, MultiSelect, theme::ColorfulTheme};
    use harmonizer_core::application::ApplicationError;

    use super::*;

    /// Asks for the project name, then the classes, on the terminal.
    #[derive(Debug, Clone, Default)]
    pub struct InteractivePrompt {
        /// Pre-filled answer for the name question.
        name: Option<String>,
    }

    impl InteractivePrompt {
        pub fn new(name: Option<String>) -> Self {
            Self { name }
        }
    }

    /// Ctrl-C surfaces as an interrupted read.
    pub(super) fn failed(err: dialoguer::Error) -> ApplicationError {
        let io = std::io::Error::from(err);
        if io.kind() == std::io::ErrorKind::Interrupted {
            ApplicationError::PromptCancelled
        } else {
            ApplicationError::PromptFailed {
                reason: io.to_string(),
            }
        }
    }

    impl OperatorPrompt for InteractivePrompt {
        fn ask(&self, request: &PromptRequest) -> HarmonizerResult<ClassSelection> {
            let theme = ColorfulTheme::default();

            let default_name = self
                .name
                .clone()
                .unwrap_or_else(|| request.default_project_name.clone());
            let name: String = Input::with_theme(&theme)
                .with_prompt(NAME_QUESTION)
                .default(default_name)
                .validate_with(|input: &String| validate_project_name(input))
                .interact_text()
                .map_err(failed)?;

            let names: Vec<&str> = request.candidates.iter().map(|c| c.name.as_str()).collect();
            let checked: Vec<bool> = request
                .candidates
                .iter()
                .map(|c| c.default_selected)
                .collect();

            let picked = MultiSelect::with_theme(&theme)
                .with_prompt(CLASS_QUESTION)
                .items(&names)
                .defaults(&checked)
                .interact_opt()
                .map_err(failed)?
                .ok_or(ApplicationError::PromptCancelled)?;

            let classes = picked.into_iter().map(|i| names[i]).collect::<Vec<_>>();
            Ok(ClassSelection::new(name, classes))
        }
    }
}
