//! Field and constructor-parameter resolution on composite type descriptors.
//!
//! Binds a configured field name to (a) the field declaration itself and
//! (b) the position of the constructor parameter that initializes it.
//! Parameter names matching field names is a project convention, not an
//! enforced constraint; when the convention is broken the index simply
//! fails to resolve.

use crate::decl::{CompositeType, FieldDef};

/// Finds the non-static field with the given name on the type.
///
/// Exact, case-sensitive match; first declaration wins. Returns `None`
/// when the type declares no such field.
pub fn resolve_field<'a>(ty: &'a CompositeType, field_name: &str) -> Option<&'a FieldDef> {
    ty.fields.iter().find(|f| f.name == field_name)
}

/// Finds the zero-based index of the constructor parameter with the given
/// name.
///
/// Uses the single constructor the frontend recorded for the type. Returns
/// `None` when the type has no constructor or no parameter with that name.
pub fn resolve_parameter_index(ty: &CompositeType, field_name: &str) -> Option<usize> {
    ty.ctor_params
        .as_ref()?
        .iter()
        .position(|p| p == field_name)
}

/// Whether the field's declared type is a native fixed-width signed integer.
///
/// Only `i32` qualifies: wider/narrower ints, unsigned ints, floats, and
/// wrapper types are all rejected.
pub fn is_integer_field(field: &FieldDef) -> bool {
    field.ty.trim() == "i32"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::decl::FieldDef;

    fn sample_type() -> CompositeType {
        CompositeType {
            name: "ErrorCode".to_string(),
            file: "codes.rs".to_string(),
            fields: vec![
                FieldDef {
                    name: "code".to_string(),
                    ty: "i32".to_string(),
                },
                FieldDef {
                    name: "message".to_string(),
                    ty: "&'static str".to_string(),
                },
            ],
            ctor_params: Some(vec!["code".to_string(), "message".to_string()]),
            consts: Vec::new(),
            config: ValidationConfig::default(),
        }
    }

    #[test]
    fn test_resolve_field_found() {
        let ty = sample_type();
        let field = resolve_field(&ty, "code").unwrap();
        assert_eq!(field.name, "code");
        assert_eq!(field.ty, "i32");
    }

    #[test]
    fn test_resolve_field_case_sensitive() {
        let ty = sample_type();
        assert!(resolve_field(&ty, "Code").is_none());
        assert!(resolve_field(&ty, "id").is_none());
    }

    #[test]
    fn test_resolve_parameter_index() {
        let ty = sample_type();
        assert_eq!(resolve_parameter_index(&ty, "code"), Some(0));
        assert_eq!(resolve_parameter_index(&ty, "message"), Some(1));
        assert_eq!(resolve_parameter_index(&ty, "missing"), None);
    }

    #[test]
    fn test_resolve_parameter_index_no_ctor() {
        let mut ty = sample_type();
        ty.ctor_params = None;
        assert_eq!(resolve_parameter_index(&ty, "code"), None);
    }

    #[test]
    fn test_is_integer_field() {
        let ty = sample_type();
        assert!(is_integer_field(resolve_field(&ty, "code").unwrap()));
        assert!(!is_integer_field(resolve_field(&ty, "message").unwrap()));
        assert!(!is_integer_field(&FieldDef {
            name: "code".to_string(),
            ty: "i64".to_string(),
        }));
        assert!(!is_integer_field(&FieldDef {
            name: "code".to_string(),
            ty: "u32".to_string(),
        }));
        assert!(!is_integer_field(&FieldDef {
            name: "code".to_string(),
            ty: "f32".to_string(),
        }));
    }
}
