//! harmonizer-core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for gen-harmonizer,
//! which turns a LinkML schema into a ready-to-run DataHarmonizer project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        harmonizer-cli (CLI)             │
//! │  (Driving side + OperatorPrompt impls)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, SchemaResolver)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (SchemaSource, TemplateSource, ...)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   harmonizer-adapters (Infrastructure)  │
//! │ (FileSchemaSource, LocalFilesystem, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SchemaDocument, ClassSelection, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harmonizer_core::prelude::*;
//!
//! let service = GenerateService::new(
//!     source, prompt, templates, renderer, filesystem, installer,
//!     GenerateOptions::default(),
//! );
//! let report = service.generate(GenerateRequest::new("schema.yaml", "./my-project"))?;
//! println!("{} successfully generated!", report.project_name);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerateReport, GenerateRequest, GenerateService, SchemaResolver,
        ports::{
            Filesystem, LoadedSchema, OperatorPrompt, PackageInstaller, PromptRequest,
            SchemaSource, TemplateRenderer, TemplateSource,
        },
    };
    pub use crate::domain::{
        ClassCandidate, ClassSelection, ImportPrecedence, ProjectStructure, ProjectTemplate,
        RenderContext, SchemaDocument, TemplateSet,
    };
    pub use crate::error::{HarmonizerError, HarmonizerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
