//! Validation engine: sequences resolution, extraction, exclusion, format
//! validation, and uniqueness checking over one round of declarations.
//!
//! The engine owns the uniqueness registry and clears it at every round
//! boundary, so registry state never leaks between rounds. Processing is
//! sequential and total: every constant either passes or contributes
//! diagnostics; nothing is silently dropped and nothing aborts the round.

use tracing::debug;

use crate::decl::CompositeType;
use crate::diagnostics::{self, Diagnostic};
use crate::extract::extract;
use crate::registry::{CodeRegistry, RegistryOutcome};
use crate::resolver::{is_integer_field, resolve_field};
use crate::validate::{render_code, should_exclude, validate_format};

/// Per-round validation engine.
#[derive(Debug, Default)]
pub struct Engine {
    registry: CodeRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one round: clears the registry, validates every constant
    /// of every type in the batch, and returns the accumulated diagnostics.
    pub fn process_round(&mut self, batch: &[CompositeType]) -> Vec<Diagnostic> {
        self.registry.clear();

        let mut diagnostics = Vec::new();
        for ty in batch {
            debug!(type_name = %ty.name, consts = ty.consts.len(), "validating type");
            self.process_type(ty, &mut diagnostics);
        }
        diagnostics
    }

    fn process_type(&mut self, ty: &CompositeType, diagnostics: &mut Vec<Diagnostic>) {
        for decl in &ty.consts {
            self.process_const(ty, decl, diagnostics);
        }
    }

    fn process_const(
        &mut self,
        ty: &CompositeType,
        decl: &crate::decl::ConstDecl,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let config = &ty.config;

        let Some(field) = resolve_field(ty, &config.code_field) else {
            diagnostics.push(Diagnostic::const_error(
                &ty.name,
                &decl.name,
                &ty.file,
                diagnostics::field_not_found(&config.code_field),
            ));
            return;
        };

        if !is_integer_field(field) {
            diagnostics.push(Diagnostic::const_error(
                &ty.name,
                &decl.name,
                &ty.file,
                diagnostics::field_must_be_int(&config.code_field),
            ));
            return;
        }

        let value = match extract(ty, decl, &config.code_field) {
            Ok(v) => v,
            Err(err) => {
                debug!(const_name = %decl.name, %err, "extraction failed");
                diagnostics.push(Diagnostic::const_error(
                    &ty.name,
                    &decl.name,
                    &ty.file,
                    diagnostics::unable_to_extract(&decl.name),
                ));
                return;
            }
        };

        if should_exclude(value, &config.exclude_values) {
            debug!(const_name = %decl.name, value, "excluded from validation");
            return;
        }

        for violation in validate_format(value, config) {
            diagnostics.push(Diagnostic::const_error(
                &ty.name,
                &decl.name,
                &ty.file,
                violation.message(),
            ));
        }

        let code = render_code(value);
        let id = ty.const_id(decl);
        if let RegistryOutcome::Duplicate { first } = self.registry.check_and_register(&code, &id)
        {
            diagnostics.push(Diagnostic::const_error(
                &ty.name,
                &decl.name,
                &ty.file,
                diagnostics::duplicate_code(&code, &first.qualified_name()),
            ));
        }
    }

    /// Read access to the registry, mainly for tests and host introspection.
    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }
}
