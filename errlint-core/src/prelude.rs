//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use errlint_core::prelude::*;
//! ```

// Core types
pub use crate::config::{load_config, ErrlintConfig, ValidationConfig};
pub use crate::decl::{CompositeType, ConstDecl, ConstId};
pub use crate::diagnostics::{Diagnostic, Severity};
pub use crate::error::{ErrlintError, ErrlintResult};

// Engine
pub use crate::engine::Engine;

// Frontend
pub use crate::parse::{parse_source, parse_source_file, parse_sources, ParsedSource};

// File scanning
pub use crate::scan::{gather_rs_files, gather_rs_files_with_excludes};
