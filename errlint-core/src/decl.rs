//! Declaration descriptors shared between the source frontend and the engine.
//!
//! The engine never touches a compiler symbol API directly: the frontend
//! (see [`crate::parse`]) lowers annotated structs into these descriptors,
//! and everything downstream (resolver, extractor, validator, registry)
//! operates on them alone.

use serde::{Deserialize, Serialize};

use crate::config::ValidationConfig;

/// Identity of one constant declaration: enclosing type plus constant name.
///
/// This is the identity the uniqueness registry keys re-registration on.
/// Two constants with the same simple name in different types are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstId {
    /// Simple name of the enclosing composite type
    pub type_name: String,
    /// Simple name of the constant
    pub const_name: String,
}

impl ConstId {
    pub fn new(type_name: impl Into<String>, const_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            const_name: const_name.into(),
        }
    }

    /// Qualified name used in duplicate diagnostics (`Type::CONST`).
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.type_name, self.const_name)
    }
}

/// A non-static field declared on a composite type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, exactly as declared
    pub name: String,
    /// Field type as token text (e.g. `i32`, `&'static str`)
    pub ty: String,
}

/// One argument of a constant's initializer, as far as the frontend can
/// classify it without evaluating anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Integer literal (sign already applied)
    Int(i64),
    /// Float literal; the extractor truncates toward zero
    Float(f64),
    /// Anything that is not a numeric literal (computed, string, path, ...)
    Other,
}

/// Structured view of a constant's initializer expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitExpr {
    /// Constructor invocation with its arguments in binding order
    Ctor { args: Vec<ArgValue> },
    /// Initializer that is not a constructor invocation
    Other,
}

/// One named constant declaration of a composite type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstDecl {
    /// Simple name of the constant
    pub name: String,
    /// Structured initializer, when syntax was accessible to the frontend
    pub init: Option<InitExpr>,
    /// Canonical textual form: constant name followed by its argument list,
    /// e.g. `SUCCESS(11220001, "ok")`. Input to the textual strategies.
    pub rendered: String,
}

/// Descriptor of one annotated composite type: its fields, its constructor
/// parameter names, its constants, and the validation rules its marker
/// attribute configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeType {
    /// Simple name of the type
    pub name: String,
    /// Source file the type was declared in
    pub file: String,
    /// Non-static fields in declaration order
    pub fields: Vec<FieldDef>,
    /// Ordered parameter names of the constructor, `None` when the type
    /// declares no constructor
    pub ctor_params: Option<Vec<String>>,
    /// Constants declared with this type, in source order
    pub consts: Vec<ConstDecl>,
    /// Validation rules from the marker attribute (defaults applied)
    pub config: ValidationConfig,
}

impl CompositeType {
    /// Identity of one of this type's constants.
    pub fn const_id(&self, decl: &ConstDecl) -> ConstId {
        ConstId::new(self.name.clone(), decl.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let id = ConstId::new("ErrorCode", "SUCCESS");
        assert_eq!(id.qualified_name(), "ErrorCode::SUCCESS");
    }

    #[test]
    fn test_const_id_identity() {
        let a = ConstId::new("ErrorCode", "A");
        let b = ConstId::new("ErrorCode", "A");
        let c = ConstId::new("OtherCode", "A");
        assert_eq!(a, b);
        assert_ne!(a, c, "same constant name in a different type is distinct");
    }
}
