//! errlint-core: error-code declaration linting library for Rust.
//!
//! This library validates error codes declared as constants of structs
//! marked with `#[error_code(...)]`: each code must have the configured
//! total digit length, carry the configured decimal prefix, and be unique
//! across every declaration processed in one round.
//!
//! # Features
//!
//! - **Layered extraction**: structured syntax analysis with graceful
//!   degradation to textual pattern matching
//! - **Format validation**: digit length + decimal prefix, both always
//!   checked
//! - **Uniqueness checking**: first-writer-wins registry scoped to one
//!   processing round
//! - **Exclusion list**: sentinel values (e.g. `0`) skip validation
//! - **Resilient frontend**: malformed files are logged and skipped, never
//!   fatal
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use errlint_core::prelude::*;
//!
//! let files = gather_rs_files(Path::new("/path/to/crate"))?;
//! let (types, mut diagnostics) = parse_sources(&files, &ValidationConfig::default());
//! let mut engine = Engine::new();
//! diagnostics.extend(engine.process_round(&types));
//! ```
//!
//! # Module Organization
//!
//! - [`decl`]: Composite type and constant descriptors
//! - [`parse`]: Source frontend lowering annotated structs to descriptors
//! - [`resolver`]: Field and constructor-parameter binding
//! - [`extract`]: Layered code value extraction
//! - [`validate`]: Length and prefix format rules
//! - [`registry`]: Per-round uniqueness registry
//! - [`engine`]: Round orchestration
//! - [`scan`]: Parallel file discovery
//! - [`error`]: Typed error handling

pub mod config;
pub mod decl;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod extract;
pub mod logging;
pub mod parse;
pub mod prelude;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod scan;
pub mod validate;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{ErrlintError, ErrlintResult, IoResultExt};

// Configuration
pub use config::{load_config, ErrlintConfig, OutputConfig, ValidationConfig};

// Declaration model
pub use decl::{ArgValue, CompositeType, ConstDecl, ConstId, FieldDef, InitExpr};

// Diagnostics
pub use diagnostics::{Diagnostic, Severity};

// Engine
pub use engine::Engine;

// Extraction
pub use extract::{extract, ExtractionError};

// Resolution
pub use resolver::{is_integer_field, resolve_field, resolve_parameter_index};

// Validation
pub use validate::{render_code, should_exclude, validate_format, FormatViolation};

// Registry
pub use registry::{CodeRegistry, RegistryOutcome};

// Frontend
pub use parse::{parse_source, parse_source_file, parse_sources, ParsedSource};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{print_json, print_plain};

// File scanning
pub use scan::{gather_rs_files, gather_rs_files_with_excludes};
