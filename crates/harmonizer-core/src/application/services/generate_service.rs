//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Resolve the schema (imports merged, slots induced)
//! 2. Ask the operator for a project name and classes
//! 3. Build the schema artifacts
//! 4. Render the project skeleton
//! 5. Write skeleton and artifacts
//! 6. Install dependencies
//!
//! Nothing is written before step 5. Nothing written is removed afterwards,
//! whatever fails.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{
            Filesystem, OperatorPrompt, PackageInstaller, PromptRequest, SchemaSource,
            TemplateRenderer, TemplateSource,
        },
        services::SchemaResolver,
    },
    domain::{
        ArtifactBuilder, Artifacts, ClassCandidate, DEFAULT_INTERFACE_MARKER, DomainValidator,
        ImportPrecedence, ProjectStructure, RenderContext, SCHEMAS_DIR,
        SchemaDocument, candidates,
    },
    error::HarmonizerResult,
};

/// Resolution settings shared by every run of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub interface_marker: String,
    pub import_precedence: ImportPrecedence,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            interface_marker: DEFAULT_INTERFACE_MARKER.to_string(),
            import_precedence: ImportPrecedence::default(),
        }
    }
}

/// One generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub schema_locator: String,
    pub destination: PathBuf,
    /// Overwrite artifacts left by an earlier run.
    pub force: bool,
    pub skip_install: bool,
}

impl GenerateRequest {
    pub fn new(schema_locator: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            schema_locator: schema_locator.into(),
            destination: destination.into(),
            force: false,
            skip_install: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub project_name: String,
    pub schema_name: String,
    pub destination: PathBuf,
    /// Files written, artifacts included.
    pub files_written: usize,
    pub selected_classes: Vec<String>,
    pub installed: bool,
}

/// Main generation service.
pub struct GenerateService {
    source: Box<dyn SchemaSource>,
    prompt: Box<dyn OperatorPrompt>,
    templates: Box<dyn TemplateSource>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    installer: Box<dyn PackageInstaller>,
    options: GenerateOptions,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use harmonizer_core::application::{GenerateOptions, GenerateService};
    ///
    /// let service = GenerateService::new(
    ///     source,     // impl SchemaSource
    ///     prompt,     // impl OperatorPrompt
    ///     templates,  // impl TemplateSource
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     installer,  // impl PackageInstaller
    ///     GenerateOptions::default(),
    /// );
    /// ```
    pub fn new(
        source: Box<dyn SchemaSource>,
        prompt: Box<dyn OperatorPrompt>,
        templates: Box<dyn TemplateSource>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        installer: Box<dyn PackageInstaller>,
        options: GenerateOptions,
    ) -> Self {
        Self {
            source,
            prompt,
            templates,
            renderer,
            filesystem,
            installer,
            options,
        }
    }

    /// Resolve a schema and list its candidate classes.
    #[instrument(skip(self))]
    pub fn inspect(
        &self,
        schema_locator: &str,
    ) -> HarmonizerResult<(SchemaDocument, Vec<ClassCandidate>)> {
        let schema = self.resolver().resolve(schema_locator)?;
        let found = candidates(&schema, &self.options.interface_marker);
        Ok((schema, found))
    }

    /// Generate a project.
    #[instrument(
        skip_all,
        fields(
            schema = %request.schema_locator,
            destination = %request.destination.display()
        )
    )]
    pub fn generate(&self, request: GenerateRequest) -> HarmonizerResult<GenerateReport> {
        let (schema, found) = self.inspect(&request.schema_locator)?;
        info!(candidates = found.len(), "Candidate classes computed");

        let question = PromptRequest {
            default_project_name: default_project_name(&request.destination, schema.name()),
            schema_name: schema.name().to_string(),
            candidates: found,
        };
        let selection = self.prompt.ask(&question)?;
        DomainValidator::validate_offered(&schema, &selection, &question.candidates)?;

        let artifacts = ArtifactBuilder::build(&schema, &selection)?;
        info!(selected = selection.classes().len(), "Artifacts built");

        let schemas_dir = request.destination.join(SCHEMAS_DIR);
        if !request.force && self.filesystem.exists(&schemas_dir) {
            return Err(ApplicationError::ArtifactsExist { path: schemas_dir }.into());
        }

        let structure = self.render(selection.project_name(), schema.name(), &request.destination)?;

        let mut files_written = self.write_structure(&structure)?;
        files_written += self.write_artifacts(&request.destination, &artifacts)?;
        info!(files = files_written, "Project written");

        let installed = if request.skip_install {
            debug!("Skipping dependency installation");
            false
        } else {
            info!(program = %self.installer.program(), "Installing dependencies");
            self.installer.install(&request.destination)?;
            true
        };

        Ok(GenerateReport {
            project_name: selection.project_name().to_string(),
            schema_name: schema.name().to_string(),
            destination: request.destination,
            files_written,
            selected_classes: selection.classes().to_vec(),
            installed,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolver(&self) -> SchemaResolver<'_> {
        SchemaResolver::new(self.source.as_ref())
            .with_precedence(self.options.import_precedence)
            .with_interface_marker(self.options.interface_marker.clone())
    }

    fn render(
        &self,
        project_name: &str,
        schema_name: &str,
        destination: &Path,
    ) -> HarmonizerResult<ProjectStructure> {
        let templates = self.templates.templates()?;
        DomainValidator::validate_template_set(&templates)?;
        info!(templates = templates.len(), set = %templates.name(), "Templates loaded");

        let context = RenderContext::new(project_name, schema_name);
        let structure = self.renderer.render(&templates, &context, destination)?;
        DomainValidator::validate_project_structure(&structure)?;
        Ok(structure)
    }

    /// Write every file; returns the number written.
    fn write_structure(&self, structure: &ProjectStructure) -> HarmonizerResult<usize> {
        self.filesystem.create_dir_all(structure.root())?;

        for file in structure.files() {
            let path = structure.root().join(file.path.as_path());
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            debug!(path = %path.display(), "Wrote file");
        }

        Ok(structure.files().len())
    }

    fn write_artifacts(&self, destination: &Path, artifacts: &Artifacts) -> HarmonizerResult<usize> {
        self.filesystem
            .create_dir_all(&destination.join(SCHEMAS_DIR))?;

        for (path, content) in [
            (artifacts.schema_path(), &artifacts.serialized_schema),
            (artifacts.manifest_path(), &artifacts.serialized_manifest),
        ] {
            let path = destination.join(path);
            self.filesystem.write_file(&path, content)?;
            debug!(path = %path.display(), "Wrote artifact");
        }

        Ok(2)
    }
}

/// Final normal component of `destination`, falling back to the schema name
/// for paths like `.` or `/`.
fn default_project_name(destination: &Path, schema_name: &str) -> String {
    destination
        .components()
        .rev()
        .find_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .unwrap_or_else(|| schema_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{
        MockFilesystem, MockOperatorPrompt, MockPackageInstaller, MockTemplateRenderer,
        MockTemplateSource,
    };
    use crate::application::ports::LoadedSchema;
    use crate::domain::{
        ClassDefinition, ClassSelection, DomainError, ProjectTemplate, RelativePath,
        SchemaDefinition, TemplateSet,
    };
    use crate::error::HarmonizerError;

    struct OneSchema;

    impl SchemaSource for OneSchema {
        fn locate(&self, locator: &str, _base: Option<&str>) -> HarmonizerResult<String> {
            Ok(locator.to_string())
        }

        fn load(&self, locator: &str) -> HarmonizerResult<LoadedSchema> {
            let mut definition = SchemaDefinition {
                name: "mpox".into(),
                ..SchemaDefinition::default()
            };
            definition
                .classes
                .insert("dh_interface".into(), ClassDefinition::default());
            definition.classes.insert(
                "Isolate".into(),
                ClassDefinition {
                    is_a: Some("dh_interface".into()),
                    ..ClassDefinition::default()
                },
            );
            Ok(LoadedSchema {
                locator: locator.to_string(),
                definition,
            })
        }
    }

    fn templates() -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source.expect_templates().returning(|| {
            Ok(TemplateSet::new("test")
                .with_template(ProjectTemplate::parse("package.json.tpl", "{}")?))
        });
        source
    }

    fn renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, _, root| {
            Ok(ProjectStructure::new(root)
                .with_file(RelativePath::try_new("package.json")?, "{}"))
        });
        renderer
    }

    fn prompt(classes: &'static [&'static str]) -> MockOperatorPrompt {
        let mut prompt = MockOperatorPrompt::new();
        prompt
            .expect_ask()
            .times(1)
            .returning(move |req| Ok(ClassSelection::new(req.default_project_name.clone(), classes.iter().copied())));
        prompt
    }

    fn writable_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn service(
        prompt: MockOperatorPrompt,
        fs: MockFilesystem,
        installer: MockPackageInstaller,
    ) -> GenerateService {
        GenerateService::new(
            Box::new(OneSchema),
            Box::new(prompt),
            Box::new(templates()),
            Box::new(renderer()),
            Box::new(fs),
            Box::new(installer),
            GenerateOptions::default(),
        )
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();
        let mut installer = MockPackageInstaller::new();
        installer.expect_install().never();

        let err = service(prompt(&[]), fs, installer)
            .generate(GenerateRequest::new("mpox.yaml", "/out/proj"))
            .unwrap_err();

        assert_eq!(err, HarmonizerError::Domain(DomainError::EmptySelection));
    }

    #[test]
    fn marker_class_cannot_be_selected() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let err = service(prompt(&["Isolate", "dh_interface"]), fs, MockPackageInstaller::new())
            .generate(GenerateRequest::new("mpox.yaml", "/out/proj"))
            .unwrap_err();

        assert_eq!(
            err,
            HarmonizerError::Domain(DomainError::NotACandidate {
                class: "dh_interface".into()
            })
        );
    }

    #[test]
    fn existing_artifacts_require_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let err = service(prompt(&["Isolate"]), fs, MockPackageInstaller::new())
            .generate(GenerateRequest::new("mpox.yaml", "/out/proj"))
            .unwrap_err();

        assert!(matches!(
            err,
            HarmonizerError::Application(ApplicationError::ArtifactsExist { .. })
        ));
    }

    #[test]
    fn install_failure_is_reported_after_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(3).returning(|_, _| Ok(()));

        let mut installer = MockPackageInstaller::new();
        installer.expect_program().return_const("npm".to_string());
        installer.expect_install().times(1).returning(|dir| {
            Err(ApplicationError::InstallFailed {
                program: "npm".into(),
                dir: dir.to_path_buf(),
                reason: "exit status 1".into(),
            }
            .into())
        });

        let err = service(prompt(&["Isolate"]), fs, installer)
            .generate(GenerateRequest::new("mpox.yaml", "/out/proj"))
            .unwrap_err();

        assert!(matches!(
            err,
            HarmonizerError::Application(ApplicationError::InstallFailed { .. })
        ));
    }

    #[test]
    fn report_describes_the_run() {
        let report = service(prompt(&["Isolate"]), writable_fs(), MockPackageInstaller::new())
            .generate(GenerateRequest::new("mpox.yaml", "/out/proj").skip_install(true))
            .unwrap();

        assert_eq!(report.project_name, "proj");
        assert_eq!(report.schema_name, "mpox");
        assert_eq!(report.files_written, 3);
        assert_eq!(report.selected_classes, vec!["Isolate"]);
        assert!(!report.installed);
    }

    #[test]
    fn inspect_excludes_marker() {
        let svc = service(
            MockOperatorPrompt::new(),
            MockFilesystem::new(),
            MockPackageInstaller::new(),
        );
        let (schema, found) = svc.inspect("mpox.yaml").unwrap();

        assert_eq!(schema.name(), "mpox");
        assert_eq!(found.len(), 1);
        assert!(found[0].default_selected);
    }

    #[test]
    fn project_name_defaults_to_last_component() {
        assert_eq!(default_project_name(Path::new("out/my-app"), "s"), "my-app");
        assert_eq!(default_project_name(Path::new("out/my-app/."), "s"), "my-app");
        assert_eq!(default_project_name(Path::new("/"), "schema"), "schema");
    }
}
