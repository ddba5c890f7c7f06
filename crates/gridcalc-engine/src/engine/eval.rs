//! Expression evaluation.
//!
//! The recalculation engine only ever hands fully substituted text to an
//! [`Evaluator`]; references are gone by then. [`RhaiEvaluator`] is the
//! default implementation and delegates the arithmetic to a Rhai [`Engine`].
//!
//! Rhai's own syntax is close to, but not the same as, the algebraic surface
//! users type, so expressions are normalized first:
//!
//! - integer literals become float literals (`5/2` is `2.5`, not `2`)
//! - `^` is exponentiation
//! - tokens are re-joined with single spaces, so a negative value substituted
//!   after a minus (`2--3`) reads as `2 - -3`
//!
//! Numbers concatenated onto strings use the display form (`"x" + 1` is `x1`,
//! not `x1.0`). Unary minus binds tighter than `^`, so `-2^2` is `4`, as in
//! most spreadsheets. `print` and `debug` evaluate to nothing and write nothing.

use rhai::{Engine, EvalAltResult, ImmutableString};

use super::format::{format_dynamic, format_number};
use super::preprocess::skip_string_literal;
use super::Dynamic;
use crate::error::EvalError;

/// Upper bound on Rhai operations per evaluation; any formula terminates.
const MAX_OPERATIONS: u64 = 100_000;
const MAX_EXPR_DEPTH: usize = 64;

const MULTI_CHAR_OPERATORS: &[&str] = &["**", "<=", ">=", "==", "!=", "&&", "||"];

/// Evaluates a literal expression (references already substituted) into a
/// display string. Implementations are stateless and side-effect free.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError>;
}

/// Create a Rhai engine with built-ins registered and evaluation limits set.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_EXPR_DEPTH);
    engine.disable_symbol("eval");
    engine.on_print(|_| {});
    engine.on_debug(|_, _, _| {});
    // Built-in operators on standard types can only be overloaded with fast operators off.
    engine.set_fast_operators(false);
    engine.register_fn("+", |s: ImmutableString, n: f64| format!("{s}{}", format_number(n)));
    engine.register_fn("+", |n: f64, s: ImmutableString| format!("{}{s}", format_number(n)));
    crate::builtins::register_builtins(&mut engine);
    engine
}

/// [`Evaluator`] backed by the Rhai scripting engine.
pub struct RhaiEvaluator {
    engine: Engine,
}

impl RhaiEvaluator {
    pub fn new() -> Self {
        RhaiEvaluator {
            engine: create_engine(),
        }
    }

    /// Evaluate without formatting; exposed for callers that want the raw value.
    pub fn eval_dynamic(&self, expression: &str) -> Result<Dynamic, EvalError> {
        let normalized = normalize_expression(expression);
        if normalized.is_empty() {
            return Err(EvalError::Empty);
        }
        self.engine
            .eval_expression::<Dynamic>(&normalized)
            .map_err(|e| map_rhai_error(*e))
    }
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for RhaiEvaluator {
    fn evaluate(&self, expression: &str) -> Result<String, EvalError> {
        let value = self.eval_dynamic(expression)?;
        if value.is_unit() {
            return Err(EvalError::NoValue);
        }
        if value.as_float().is_ok_and(|n| !n.is_finite()) {
            return Err(EvalError::NonFinite);
        }
        format_dynamic(&value).ok_or_else(|| EvalError::Unsupported(value.type_name().to_string()))
    }
}

fn map_rhai_error(err: EvalAltResult) -> EvalError {
    match err {
        EvalAltResult::ErrorParsing(kind, _) => EvalError::Parse(kind.to_string()),
        other => EvalError::Runtime(other.to_string()),
    }
}

/// Rewrite an algebraic expression into Rhai syntax (see module docs).
pub fn normalize_expression(expr: &str) -> String {
    let bytes = expr.as_bytes();
    let mut tokens: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'"' {
            let end = skip_string_literal(bytes, i);
            tokens.push(expr[i..end].to_string());
            i = end;
        } else if b.is_ascii_digit() || (b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            let (literal, end) = float_literal(expr, i);
            tokens.push(literal);
            i = end;
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(expr[start..i].to_string());
        } else if b == b'^' {
            tokens.push("**".to_string());
            i += 1;
        } else if let Some(op) = MULTI_CHAR_OPERATORS
            .iter()
            .find(|op| expr[i..].starts_with(**op))
        {
            tokens.push(op.to_string());
            i += op.len();
        } else {
            let ch = expr[i..].chars().next().unwrap_or_default();
            tokens.push(ch.to_string());
            i += ch.len_utf8().max(1);
        }
    }

    tokens.join(" ")
}

/// Read a number starting at `start` and return it as a Rhai float literal
/// together with the index just past it.
fn float_literal(expr: &str, start: usize) -> (String, usize) {
    let bytes = expr.as_bytes();
    let mut i = start;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_part = &expr[start..i];

    let mut frac_part = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        i = frac_start;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_part = &expr[frac_start..i];
    }

    let mut exponent = "";
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            exponent = &expr[i..j];
            i = j;
        }
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    (format!("{int_part}.{frac_part}{exponent}"), i)
}
