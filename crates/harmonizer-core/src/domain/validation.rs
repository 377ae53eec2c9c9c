use crate::domain::{
    artifacts::{ClassSelection, MENU_FILE_NAME},
    class_filter::ClassCandidate,
    entities::{ProjectStructure, TemplateSet},
    error::DomainError,
    schema::SchemaDocument,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template_set(templates: &TemplateSet) -> Result<(), DomainError> {
        templates.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// The selection must be non-empty and name only classes of `schema`.
    pub fn validate_selection(
        schema: &SchemaDocument,
        selection: &ClassSelection,
    ) -> Result<(), DomainError> {
        if selection.is_empty() {
            return Err(DomainError::EmptySelection);
        }
        match selection
            .classes()
            .iter()
            .find(|c| !schema.contains_class(c))
        {
            Some(unknown) => Err(DomainError::ClassNotInSchema {
                class: unknown.clone(),
            }),
            None => Ok(()),
        }
    }

    /// [`Self::validate_selection`], then every selected class must be one of
    /// `offered`. The marker class exists in the schema but is never offered.
    pub fn validate_offered(
        schema: &SchemaDocument,
        selection: &ClassSelection,
        offered: &[ClassCandidate],
    ) -> Result<(), DomainError> {
        Self::validate_selection(schema, selection)?;
        match selection
            .classes()
            .iter()
            .find(|c| !offered.iter().any(|o| &o.name == *c))
        {
            Some(class) => Err(DomainError::NotACandidate {
                class: class.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The schema name becomes `src/schemas/<name>.json`, next to the manifest.
    pub fn validate_schema_name(name: &str) -> Result<(), DomainError> {
        let reject = |reason: &str| {
            Err(DomainError::InvalidSchemaName {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        };
        if name.trim().is_empty() {
            return reject("it is empty");
        }
        if name.contains('/') || name.contains('\\') {
            return reject("it contains a path separator");
        }
        if name.contains("..") {
            return reject("it contains '..'");
        }
        if Some(name) == MENU_FILE_NAME.strip_suffix(".json") {
            return reject("it would overwrite the selection manifest");
        }
        Ok(())
    }
}
