//! Source frontend: lowers annotated Rust sources into composite type
//! descriptors.
//!
//! Discovers structs carrying `#[error_code(...)]`, reads their fields, the
//! first `fn new` of their inherent impls, and every `const` of the struct
//! type (associated or module-level), and produces the descriptors the
//! engine validates. Resilient: a file that does not parse yields an empty
//! result and a log line, never an aborted run.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::parse::Parse;
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, Fields, ImplItem, Item, ItemImpl, Lit, Member, Type,
    UnOp,
};
use tracing::warn;

use crate::config::ValidationConfig;
use crate::decl::{ArgValue, CompositeType, ConstDecl, FieldDef, InitExpr};
use crate::diagnostics::{self, Diagnostic};
use crate::error::{ErrlintResult, IoResultExt};

/// Name of the marker attribute on composite types.
const MARKER_ATTR: &str = "error_code";

/// Result of lowering one source file.
#[derive(Debug, Default)]
pub struct ParsedSource {
    /// Annotated composite types found in the file
    pub types: Vec<CompositeType>,
    /// Frontend diagnostics (misplaced markers, malformed markers)
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses one source file from disk and lowers it.
pub fn parse_source_file(path: &Path, defaults: &ValidationConfig) -> ErrlintResult<ParsedSource> {
    let content = std::fs::read_to_string(path).with_path(path)?;
    Ok(parse_source(path, &content, defaults))
}

/// Lowers source content into composite type descriptors.
///
/// On parse error, returns an empty result (resilient behavior).
pub fn parse_source(path: &Path, content: &str, defaults: &ValidationConfig) -> ParsedSource {
    let ast = match syn::parse_file(content) {
        Ok(ast) => ast,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "source parse failed");
            return ParsedSource::default();
        }
    };

    let file_name = path.display().to_string();
    let mut items = Vec::new();
    collect_items(&ast.items, &mut items);

    let mut parsed = ParsedSource::default();
    let mut raw_consts: Vec<(usize, String, Expr)> = Vec::new();

    // First pass: annotated structs and misplaced markers.
    for &item in &items {
        match item {
            Item::Struct(s) => {
                let Some(attr) = marker_attr(&s.attrs) else {
                    continue;
                };
                let name = s.ident.to_string();
                let config = match parse_marker(attr, defaults) {
                    Ok(cfg) => cfg,
                    Err(detail) => {
                        parsed.diagnostics.push(Diagnostic::type_error(
                            &name,
                            &file_name,
                            diagnostics::invalid_marker(&detail),
                        ));
                        continue;
                    }
                };
                parsed.types.push(CompositeType {
                    name,
                    file: file_name.clone(),
                    fields: struct_fields(&s.fields),
                    ctor_params: None,
                    consts: Vec::new(),
                    config,
                });
            }
            other => {
                if let Some((attrs, name)) = item_attrs_and_name(other) {
                    if marker_attr(attrs).is_some() {
                        parsed.diagnostics.push(Diagnostic::type_error(
                            &name,
                            &file_name,
                            diagnostics::marker_on_non_struct(&name),
                        ));
                    }
                }
            }
        }
    }

    // Second pass: constructors and constants. Constants are collected raw
    // and lowered afterwards, once every constructor is known (struct
    // literal arguments are normalized to constructor-parameter order).
    for &item in &items {
        match item {
            Item::Impl(imp) if imp.trait_.is_none() => {
                let Some(idx) = impl_target(&parsed.types, imp) else {
                    continue;
                };
                for impl_item in &imp.items {
                    match impl_item {
                        ImplItem::Fn(f) if f.sig.ident == "new" => {
                            // First constructor wins; later ones are ignored.
                            if parsed.types[idx].ctor_params.is_none() {
                                parsed.types[idx].ctor_params = Some(fn_param_names(&f.sig));
                            }
                        }
                        ImplItem::Const(c) => {
                            if type_matches(&c.ty, &parsed.types[idx].name) {
                                raw_consts.push((idx, c.ident.to_string(), c.expr.clone()));
                            }
                        }
                        _ => {}
                    }
                }
            }
            Item::Const(c) => {
                if let Some(idx) = parsed
                    .types
                    .iter()
                    .position(|ty| type_matches(&c.ty, &ty.name))
                {
                    raw_consts.push((idx, c.ident.to_string(), (*c.expr).clone()));
                }
            }
            _ => {}
        }
    }

    for (idx, name, expr) in raw_consts {
        let decl = lower_const(&name, &expr, &parsed.types[idx]);
        parsed.types[idx].consts.push(decl);
    }

    parsed
}

/// Parses many files in parallel, merging descriptors and diagnostics.
///
/// Unreadable files are logged and skipped; one bad file never aborts the
/// batch.
pub fn parse_sources(
    files: &[PathBuf],
    defaults: &ValidationConfig,
) -> (Vec<CompositeType>, Vec<Diagnostic>) {
    let results: Vec<ParsedSource> = files
        .par_iter()
        .filter_map(|path| match parse_source_file(path, defaults) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                None
            }
        })
        .collect();

    let mut types = Vec::new();
    let mut diagnostics = Vec::new();
    for r in results {
        types.extend(r.types);
        diagnostics.extend(r.diagnostics);
    }
    (types, diagnostics)
}

/// Flattens items, recursing into inline modules.
fn collect_items<'a>(items: &'a [Item], out: &mut Vec<&'a Item>) {
    for item in items {
        out.push(item);
        if let Item::Mod(m) = item {
            if let Some((_, inner)) = &m.content {
                collect_items(inner, out);
            }
        }
    }
}

fn marker_attr(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|a| a.path().is_ident(MARKER_ATTR))
}

/// Attributes and name of items the marker could be misplaced on.
fn item_attrs_and_name(item: &Item) -> Option<(&[Attribute], String)> {
    match item {
        Item::Enum(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Fn(i) => Some((&i.attrs, i.sig.ident.to_string())),
        Item::Trait(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Union(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Type(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Mod(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Const(i) => Some((&i.attrs, i.ident.to_string())),
        Item::Static(i) => Some((&i.attrs, i.ident.to_string())),
        _ => None,
    }
}

/// Reads marker keys, starting from the given defaults.
fn parse_marker(attr: &Attribute, defaults: &ValidationConfig) -> Result<ValidationConfig, String> {
    let mut cfg = defaults.clone();

    // Bare `#[error_code]` keeps all defaults.
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(cfg);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("prefix") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            cfg.prefix = lit.value();
        } else if meta.path.is_ident("length") {
            let lit: syn::LitInt = meta.value()?.parse()?;
            cfg.length = lit.base10_parse()?;
        } else if meta.path.is_ident("code_field") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            cfg.code_field = lit.value();
        } else if meta.path.is_ident("exclude") {
            let content;
            syn::parenthesized!(content in meta.input);
            let values = content.parse_terminated(Expr::parse, syn::Token![,])?;
            let mut excludes = Vec::new();
            for expr in &values {
                match int_literal(expr).and_then(|v| i32::try_from(v).ok()) {
                    Some(v) => excludes.push(v),
                    None => return Err(meta.error("exclude values must be integer literals")),
                }
            }
            cfg.exclude_values = excludes;
        } else {
            return Err(meta.error("unknown #[error_code] key"));
        }
        Ok(())
    })
    .map_err(|e| e.to_string())?;

    Ok(cfg)
}

/// Named, non-static fields of the struct, in declaration order.
fn struct_fields(fields: &Fields) -> Vec<FieldDef> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| {
                let ident = f.ident.as_ref()?;
                Some(FieldDef {
                    name: ident.to_string(),
                    ty: f.ty.to_token_stream().to_string(),
                })
            })
            .collect(),
        // Tuple and unit structs have no named fields to bind.
        _ => Vec::new(),
    }
}

/// Index of the annotated type an inherent impl targets, if any.
fn impl_target(types: &[CompositeType], imp: &ItemImpl) -> Option<usize> {
    let Type::Path(p) = imp.self_ty.as_ref() else {
        return None;
    };
    let ident = p.path.segments.last()?.ident.to_string();
    types.iter().position(|ty| ty.name == ident)
}

/// Parameter names of a constructor signature, in order.
fn fn_param_names(sig: &syn::Signature) -> Vec<String> {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            syn::FnArg::Typed(pat) => match pat.pat.as_ref() {
                syn::Pat::Ident(id) => Some(id.ident.to_string()),
                _ => None,
            },
            syn::FnArg::Receiver(_) => None,
        })
        .collect()
}

/// Whether a type annotation refers to the named struct (or `Self`).
fn type_matches(ty: &Type, name: &str) -> bool {
    let Type::Path(p) = ty else {
        return false;
    };
    p.path
        .segments
        .last()
        .is_some_and(|seg| seg.ident == name || seg.ident == "Self")
}

/// Lowers one constant declaration: structured initializer plus canonical
/// rendered text (`NAME(arg, arg, ...)`).
fn lower_const(name: &str, expr: &Expr, ty: &CompositeType) -> ConstDecl {
    let (init, arg_texts) = lower_init(expr, ty);
    let rendered = format!("{}({})", name, arg_texts.join(", "));
    ConstDecl {
        name: name.to_string(),
        init: Some(init),
        rendered,
    }
}

fn lower_init(expr: &Expr, ty: &CompositeType) -> (InitExpr, Vec<String>) {
    match expr {
        Expr::Call(call) if is_ctor_call(call, &ty.name) => {
            let args = call.args.iter().map(arg_value).collect();
            let texts = call.args.iter().map(render_tokens).collect();
            (InitExpr::Ctor { args }, texts)
        }
        Expr::Struct(lit) => {
            // Named arguments: normalize to constructor-parameter order, or
            // field-declaration order when the type has no constructor.
            let order: Vec<String> = match &ty.ctor_params {
                Some(params) => params.clone(),
                None => ty.fields.iter().map(|f| f.name.clone()).collect(),
            };
            let mut args = Vec::with_capacity(order.len());
            let mut texts = Vec::with_capacity(order.len());
            for field_name in &order {
                let value = lit.fields.iter().find(|f| match &f.member {
                    Member::Named(id) => id == field_name.as_str(),
                    Member::Unnamed(_) => false,
                });
                match value {
                    Some(f) => {
                        args.push(arg_value(&f.expr));
                        texts.push(render_tokens(&f.expr));
                    }
                    None => {
                        args.push(ArgValue::Other);
                        texts.push(String::new());
                    }
                }
            }
            (InitExpr::Ctor { args }, texts)
        }
        other => (InitExpr::Other, vec![render_tokens(other)]),
    }
}

/// Whether a call expression is a constructor invocation of the type:
/// an associated-function call owned by the type itself, like
/// `Type::new(...)` or `Self::new(...)`.
///
/// Calls owned by any other path (`OtherType::new(...)`, bare `new(...)`)
/// are opaque: their arguments do not follow this type's parameter order.
fn is_ctor_call(call: &syn::ExprCall, type_name: &str) -> bool {
    let Expr::Path(p) = call.func.as_ref() else {
        return false;
    };
    let segments = &p.path.segments;
    if segments.len() < 2 {
        return false;
    }
    let owner = &segments[segments.len() - 2];
    owner.ident == type_name || owner.ident == "Self"
}

/// Classifies an argument expression as a numeric literal or opaque.
fn arg_value(expr: &Expr) -> ArgValue {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(i), ..
        }) => i
            .base10_parse::<i64>()
            .map(ArgValue::Int)
            .unwrap_or(ArgValue::Other),
        Expr::Lit(ExprLit {
            lit: Lit::Float(f), ..
        }) => f
            .base10_parse::<f64>()
            .map(ArgValue::Float)
            .unwrap_or(ArgValue::Other),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match arg_value(expr) {
            ArgValue::Int(v) => ArgValue::Int(-v),
            ArgValue::Float(f) => ArgValue::Float(-f),
            ArgValue::Other => ArgValue::Other,
        },
        Expr::Group(g) => arg_value(&g.expr),
        Expr::Paren(p) => arg_value(&p.expr),
        _ => ArgValue::Other,
    }
}

/// Integer literal value of an expression, if it is one (sign included).
fn int_literal(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(i), ..
        }) => i.base10_parse().ok(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => int_literal(expr).map(|v| -v),
        Expr::Group(g) => int_literal(&g.expr),
        Expr::Paren(p) => int_literal(&p.expr),
        _ => None,
    }
}

fn render_tokens<T: ToTokens>(node: &T) -> String {
    let tokens: TokenStream = node.to_token_stream();
    tokens.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> ParsedSource {
        parse_source(
            &PathBuf::from("test.rs"),
            content,
            &ValidationConfig::default(),
        )
    }

    const BASIC: &str = r#"
#[error_code(prefix = "1122", length = 8, code_field = "code")]
pub struct ErrorCode {
    code: i32,
    message: &'static str,
}

impl ErrorCode {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }

    pub const SUCCESS: Self = Self::new(11220001, "Operation successful");
    pub const PARAM_ERROR: Self = Self::new(11220002, "Parameter error");
}
"#;

    #[test]
    fn test_basic_struct_lowering() {
        let parsed = parse(BASIC);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.types.len(), 1);

        let ty = &parsed.types[0];
        assert_eq!(ty.name, "ErrorCode");
        assert_eq!(ty.fields.len(), 2);
        assert_eq!(ty.fields[0].name, "code");
        assert_eq!(ty.fields[0].ty, "i32");
        assert_eq!(
            ty.ctor_params,
            Some(vec!["code".to_string(), "message".to_string()])
        );
        assert_eq!(ty.consts.len(), 2);
        assert_eq!(ty.consts[0].name, "SUCCESS");
        assert_eq!(
            ty.consts[0].init,
            Some(InitExpr::Ctor {
                args: vec![ArgValue::Int(11220001), ArgValue::Other],
            })
        );
        assert!(ty.consts[0].rendered.starts_with("SUCCESS("));
        assert!(ty.consts[0].rendered.contains("11220001"));
    }

    #[test]
    fn test_bare_marker_uses_defaults() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32 }
"#,
        );
        assert_eq!(parsed.types[0].config, ValidationConfig::default());
    }

    #[test]
    fn test_marker_exclude_list() {
        let parsed = parse(
            r#"
#[error_code(exclude(0, -1, 7))]
struct Code { code: i32 }
"#,
        );
        assert_eq!(parsed.types[0].config.exclude_values, vec![0, -1, 7]);
    }

    #[test]
    fn test_malformed_marker_reports_and_skips_type() {
        let parsed = parse(
            r#"
#[error_code(lenght = 8)]
struct Code { code: i32 }
"#,
        );
        assert!(parsed.types.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("Invalid #[error_code]"));
    }

    #[test]
    fn test_marker_on_enum_is_misplaced() {
        let parsed = parse(
            r#"
#[error_code]
enum Codes { A, B }
"#,
        );
        assert!(parsed.types.is_empty());
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("not a struct"));
    }

    #[test]
    fn test_struct_literal_normalized_to_ctor_order() {
        let parsed = parse(
            r#"
#[error_code]
struct Code {
    code: i32,
    message: &'static str,
}

impl Code {
    pub const fn new(message: &'static str, code: i32) -> Self {
        Self { code, message }
    }

    pub const A: Code = Code { code: 11220001, message: "x" };
}
"#,
        );
        let ty = &parsed.types[0];
        // Constructor order is (message, code): the named literal's args are
        // reordered to match.
        assert_eq!(
            ty.consts[0].init,
            Some(InitExpr::Ctor {
                args: vec![ArgValue::Other, ArgValue::Int(11220001)],
            })
        );
    }

    #[test]
    fn test_module_level_const() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32, message: &'static str }

impl Code {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }
}

const TOP: Code = Code::new(11220005, "top");
"#,
        );
        let ty = &parsed.types[0];
        assert_eq!(ty.consts.len(), 1);
        assert_eq!(ty.consts[0].name, "TOP");
    }

    #[test]
    fn test_computed_argument_is_opaque() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32, message: &'static str }

impl Code {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }

    pub const BAD: Self = Self::new(BASE_OFFSET, "bad");
}
"#,
        );
        let ty = &parsed.types[0];
        assert_eq!(
            ty.consts[0].init,
            Some(InitExpr::Ctor {
                args: vec![ArgValue::Other, ArgValue::Other],
            })
        );
        assert!(ty.consts[0].rendered.contains("BASE_OFFSET"));
    }

    #[test]
    fn test_foreign_new_call_is_opaque() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32, message: &'static str }

impl Code {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }

    pub const A: Self = Registry::new(11220001, "x");
    pub const B: Self = Code::new(11220002, "ok");
}
"#,
        );
        let ty = &parsed.types[0];
        // A `new` owned by another type is not this type's constructor; its
        // arguments must not be mapped against this type's parameter order.
        assert_eq!(ty.consts[0].init, Some(InitExpr::Other));
        assert_eq!(
            ty.consts[1].init,
            Some(InitExpr::Ctor {
                args: vec![ArgValue::Int(11220002), ArgValue::Other],
            })
        );
    }

    #[test]
    fn test_bare_new_call_is_opaque() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32, message: &'static str }

impl Code {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }

    pub const A: Self = new(11220003, "bare");
}
"#,
        );
        let ty = &parsed.types[0];
        assert_eq!(ty.consts[0].init, Some(InitExpr::Other));
    }

    #[test]
    fn test_negative_literal_argument() {
        let parsed = parse(
            r#"
#[error_code]
struct Code { code: i32, message: &'static str }

impl Code {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }

    pub const NEG: Self = Self::new(-5, "neg");
}
"#,
        );
        let ty = &parsed.types[0];
        assert_eq!(
            ty.consts[0].init,
            Some(InitExpr::Ctor {
                args: vec![ArgValue::Int(-5), ArgValue::Other],
            })
        );
    }

    #[test]
    fn test_nested_module_struct() {
        let parsed = parse(
            r#"
mod inner {
    #[error_code]
    pub struct Code { code: i32 }
}
"#,
        );
        assert_eq!(parsed.types.len(), 1);
        assert_eq!(parsed.types[0].name, "Code");
    }

    #[test]
    fn test_malformed_source_is_resilient() {
        let parsed = parse("struct { broken");
        assert!(parsed.types.is_empty());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn test_unannotated_struct_ignored() {
        let parsed = parse("struct Plain { code: i32 }");
        assert!(parsed.types.is_empty());
    }
}
