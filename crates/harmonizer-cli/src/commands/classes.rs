//! Implementation of the `gen-harmonizer classes` command.

use serde::Serialize;
use tracing::instrument;

use harmonizer_adapters::{
    BuiltinTemplates, CommandInstaller, FileSchemaSource, LocalFilesystem, SubstitutionRenderer,
};
use harmonizer_core::{
    application::{GenerateOptions, GenerateService},
    domain::{ClassCandidate, ImportPrecedence, SchemaDocument},
};

use crate::{
    cli::{ClassesArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompt::PresetPrompt,
};

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ClassRow {
    name: String,
    default_selected: bool,
    attributes: usize,
}

#[instrument(skip_all, fields(schema = %args.schema))]
pub fn execute(args: ClassesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let marker = args
        .marker
        .clone()
        .unwrap_or_else(|| config.defaults.interface_marker.clone());
    let precedence = args
        .import_precedence
        .map(ImportPrecedence::from)
        .unwrap_or(config.defaults.import_precedence);

    // Only the schema source is used; nothing is asked, written or installed.
    let service = GenerateService::new(
        Box::new(FileSchemaSource::new()),
        Box::new(PresetPrompt::default()),
        Box::new(BuiltinTemplates::new()),
        Box::new(SubstitutionRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(CommandInstaller::new(
            config.install.program.clone(),
            config.install.args.clone(),
        )),
        GenerateOptions {
            interface_marker: marker.clone(),
            import_precedence: precedence,
        },
    );
    let (schema, found) = service.inspect(&args.schema)?;

    let rows = rows(&schema, found);

    // --output-format json implies the json listing.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("Classes in '{}':", schema.name()))?;
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in &rows {
                let mark = if row.default_selected { "[x]" } else { "[ ]" };
                output.print(&format!(
                    "  {mark} {:<width$}  {} attributes",
                    row.name, row.attributes
                ))?;
            }
            output.print("")?;
            output.print(&format!(
                "[x] = descends from '{marker}', selected by default"
            ))?;
        }
        ListFormat::List => {
            for row in &rows {
                output.print(&row.name)?;
            }
        }
        ListFormat::Json => {
            let value = serde_json::to_value(&rows).map_err(std::io::Error::other)?;
            output.json(&value)?;
        }
    }

    Ok(())
}

fn rows(schema: &SchemaDocument, found: Vec<ClassCandidate>) -> Vec<ClassRow> {
    found
        .into_iter()
        .map(|candidate| ClassRow {
            attributes: schema
                .class(&candidate.name)
                .map(|class| class.attributes.len())
                .unwrap_or(0),
            name: candidate.name,
            default_selected: candidate.default_selected,
        })
        .collect()
}
