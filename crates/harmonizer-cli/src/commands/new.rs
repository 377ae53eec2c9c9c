//! Implementation of the `gen-harmonizer new` command.
//!
//! Responsibility: merge flags with configuration, pick the adapters, call
//! the core generate service, and display results. No business logic lives
//! here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use harmonizer_adapters::{
    BuiltinTemplates, CommandInstaller, DirectoryTemplates, FileSchemaSource, LocalFilesystem,
    SubstitutionRenderer,
};
use harmonizer_core::{
    application::{
        ApplicationError, GenerateOptions, GenerateReport, GenerateRequest, GenerateService,
        ports::{OperatorPrompt, TemplateSource},
    },
    domain::ImportPrecedence,
    error::HarmonizerError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::{self, PresetPrompt},
};

/// Flags and configuration merged into one set of run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunSettings {
    options: GenerateOptions,
    templates: Option<PathBuf>,
    skip_install: bool,
    /// Answer from flags instead of asking.
    preset: bool,
}

impl RunSettings {
    fn resolve(args: &NewArgs, global: &GlobalArgs, config: &AppConfig) -> Self {
        let import_precedence = args
            .import_precedence
            .map(ImportPrecedence::from)
            .unwrap_or(config.defaults.import_precedence);

        Self {
            options: GenerateOptions {
                interface_marker: args
                    .marker
                    .clone()
                    .unwrap_or_else(|| config.defaults.interface_marker.clone()),
                import_precedence,
            },
            templates: args
                .templates
                .clone()
                .or_else(|| config.templates.local_path.clone()),
            skip_install: args.skip_install || config.install.skip,
            // Quiet runs never block on a question.
            preset: args.yes || !args.classes.is_empty() || global.quiet,
        }
    }
}

/// Execute the `gen-harmonizer new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name, if given
/// 2. Merge flags with configuration
/// 3. Build the adapters
/// 4. Run the generate service (it asks the operator exactly once)
/// 5. Print the result and next steps
#[instrument(skip_all, fields(schema = %args.schema, dest = %args.destination.display()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Name
    if let Some(name) = &args.name {
        prompt::validate_project_name(name).map_err(|reason| CliError::InvalidProjectName {
            name: name.clone(),
            reason,
        })?;
    }

    // 2. Settings
    let settings = RunSettings::resolve(&args, &global, &config);
    debug!(
        marker = %settings.options.interface_marker,
        precedence = %settings.options.import_precedence,
        templates = ?settings.templates,
        skip_install = settings.skip_install,
        preset = settings.preset,
        "Settings resolved"
    );

    // 3. Adapters
    let prompt = build_prompt(&args, settings.preset)?;
    let templates: Box<dyn TemplateSource> = match &settings.templates {
        Some(dir) => Box::new(DirectoryTemplates::new(dir)),
        None => Box::new(BuiltinTemplates::new()),
    };
    let installer = CommandInstaller::new(
        config.install.program.clone(),
        config.install.args.clone(),
    );

    let service = GenerateService::new(
        Box::new(FileSchemaSource::new()),
        prompt,
        templates,
        Box::new(SubstitutionRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(installer),
        settings.options,
    );

    // 4. Generate
    info!("Generation started");
    let destination = absolute_destination(&args.destination)?;
    debug!(destination = %destination.display(), "Destination resolved");
    let request = GenerateRequest::new(args.schema, destination)
        .force(args.force)
        .skip_install(settings.skip_install);

    let report = service.generate(request).map_err(cancelled_or_core)?;
    info!(
        project = %report.project_name,
        files = report.files_written,
        "Generation completed"
    );

    // 5. Result
    if output.is_json() {
        output.json(&report_json(&report))?;
    } else {
        output.generated(&report.project_name, &report.destination, report.installed)?;
    }

    Ok(())
}

/// `.` and other relative destinations become absolute, so the default
/// project name is the directory's own name. Symlinks are resolved when the
/// directory already exists.
fn absolute_destination(destination: &Path) -> CliResult<PathBuf> {
    let absolute = std::path::absolute(destination)?;
    Ok(absolute.canonicalize().unwrap_or(absolute))
}

fn build_prompt(args: &NewArgs, preset: bool) -> CliResult<Box<dyn OperatorPrompt>> {
    if preset {
        return Ok(Box::new(PresetPrompt::new(
            args.name.clone(),
            args.classes.clone(),
        )));
    }

    #[cfg(feature = "interactive")]
    {
        Ok(Box::new(prompt::InteractivePrompt::new(args.name.clone())))
    }

    #[cfg(not(feature = "interactive"))]
    {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

/// A dismissed dialog is a cancellation, not a failure.
fn cancelled_or_core(err: HarmonizerError) -> CliError {
    match err {
        HarmonizerError::Application(ApplicationError::PromptCancelled) => CliError::Cancelled,
        err => CliError::Core(err),
    }
}

fn report_json(report: &GenerateReport) -> serde_json::Value {
    serde_json::json!({
        "project_name": report.project_name,
        "schema_name": report.schema_name,
        "destination": report.destination.display().to_string(),
        "files_written": report.files_written,
        "selected_classes": report.selected_classes,
        "installed": report.installed,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
