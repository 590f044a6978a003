//! Code value extraction from constant declarations.
//!
//! Three strategies tried in strict order, first success wins:
//!
//! 1. Structured: read the integer literal out of the initializer's
//!    constructor-invocation syntax at the resolved parameter index.
//! 2. Name-anchored pattern: match `NAME(<digits>` against the constant's
//!    rendered text. Position-0 only; the high-confidence fallback for the
//!    "code is the first constructor argument" convention.
//! 3. Positional split: split the rendered argument list on commas and
//!    clean the substring at the resolved index down to digits.
//!
//! All strategies are pure; a failing strategy returns a tagged error and
//! never panics or aborts the containing round.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::decl::{ArgValue, CompositeType, ConstDecl, InitExpr};
use crate::resolver::resolve_parameter_index;

/// Pattern matching a constant's argument list between its outermost parens.
/// Known limitation: the comma split downstream is naive — nested parens,
/// quoted commas, and escapes are not understood.
const ARGUMENT_LIST_PATTERN: &str = r"\(([^)]+)\)";

static ARGUMENT_LIST_RE: OnceLock<Regex> = OnceLock::new();

fn argument_list_re() -> &'static Regex {
    ARGUMENT_LIST_RE.get_or_init(|| {
        Regex::new(ARGUMENT_LIST_PATTERN).expect("argument list pattern is valid")
    })
}

/// Why one strategy (or the whole extraction) failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No structured initializer syntax is available for the constant
    #[error("no initializer syntax available")]
    NoSyntax,

    /// The initializer is not a constructor invocation
    #[error("initializer is not a constructor invocation")]
    NotConstructor,

    /// The constructor invocation has no arguments
    #[error("constructor invocation has no arguments")]
    EmptyArguments,

    /// The code field's parameter index could not be resolved
    #[error("code field does not bind to a constructor parameter")]
    UnresolvedIndex,

    /// The resolved index lies outside the argument list
    #[error("resolved parameter index is out of range")]
    IndexOutOfRange,

    /// The argument at the resolved index is not a numeric literal
    #[error("argument is not an integer literal")]
    NotIntegerLiteral,

    /// The textual pattern did not match
    #[error("textual pattern did not match")]
    PatternMismatch,

    /// The matched text did not parse as an integer
    #[error("matched text is not a valid integer")]
    InvalidNumber,

    /// Every strategy failed
    #[error("all extraction strategies exhausted")]
    Exhausted,
}

/// One extraction strategy: a pure function of the declaration.
type Strategy = fn(&CompositeType, &ConstDecl, &str) -> Result<i32, ExtractionError>;

/// Strategies in the order they are attempted.
const STRATEGIES: &[Strategy] = &[
    extract_structured,
    extract_first_arg_pattern,
    extract_positional_split,
];

/// Extracts the code value bound to `field_name` in the given constant.
///
/// Folds over the strategy list, short-circuiting on the first success.
/// Returns [`ExtractionError::Exhausted`] only when every strategy failed.
pub fn extract(
    ty: &CompositeType,
    decl: &ConstDecl,
    field_name: &str,
) -> Result<i32, ExtractionError> {
    for strategy in STRATEGIES {
        if let Ok(value) = strategy(ty, decl, field_name) {
            return Ok(value);
        }
    }
    Err(ExtractionError::Exhausted)
}

/// Strategy 1: structured extraction from the initializer syntax.
fn extract_structured(
    ty: &CompositeType,
    decl: &ConstDecl,
    field_name: &str,
) -> Result<i32, ExtractionError> {
    let init = decl.init.as_ref().ok_or(ExtractionError::NoSyntax)?;
    let InitExpr::Ctor { args } = init else {
        return Err(ExtractionError::NotConstructor);
    };
    if args.is_empty() {
        return Err(ExtractionError::EmptyArguments);
    }

    let index =
        resolve_parameter_index(ty, field_name).ok_or(ExtractionError::UnresolvedIndex)?;
    let arg = args.get(index).ok_or(ExtractionError::IndexOutOfRange)?;

    match arg {
        ArgValue::Int(v) => i32::try_from(*v).map_err(|_| ExtractionError::InvalidNumber),
        // No float codes are expected in practice, but a float literal is
        // still a numeric literal: truncate toward zero.
        ArgValue::Float(f) => Ok(f.trunc() as i32),
        ArgValue::Other => Err(ExtractionError::NotIntegerLiteral),
    }
}

/// Strategy 2a: name-anchored first-argument pattern on the rendered text.
///
/// Matches `NAME(<digits>` and ignores the resolved parameter index.
fn extract_first_arg_pattern(
    _ty: &CompositeType,
    decl: &ConstDecl,
    _field_name: &str,
) -> Result<i32, ExtractionError> {
    let pattern = format!(r"{}\s*\(\s*(\d+)", regex::escape(&decl.name));
    let re = Regex::new(&pattern).map_err(|_| ExtractionError::PatternMismatch)?;
    let caps = re
        .captures(&decl.rendered)
        .ok_or(ExtractionError::PatternMismatch)?;
    caps[1]
        .parse::<i32>()
        .map_err(|_| ExtractionError::InvalidNumber)
}

/// Strategy 2b: split the rendered argument list on commas and clean the
/// substring at the resolved index down to digits (and `-`).
fn extract_positional_split(
    ty: &CompositeType,
    decl: &ConstDecl,
    field_name: &str,
) -> Result<i32, ExtractionError> {
    let index =
        resolve_parameter_index(ty, field_name).ok_or(ExtractionError::UnresolvedIndex)?;

    let caps = argument_list_re()
        .captures(&decl.rendered)
        .ok_or(ExtractionError::PatternMismatch)?;
    let parts: Vec<&str> = caps[1].split(',').collect();
    let part = parts.get(index).ok_or(ExtractionError::IndexOutOfRange)?;

    let cleaned: String = part
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Err(ExtractionError::PatternMismatch);
    }
    cleaned
        .parse::<i32>()
        .map_err(|_| ExtractionError::InvalidNumber)
}
