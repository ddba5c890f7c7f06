//! Formula preprocessing and reference substitution.
//!
//! Before a formula can be handed to the evaluator, every cell reference in it
//! must be replaced by the referenced cell's current display value. This module
//! splits a formula expression into reference tokens and literal text:
//!
//! - **Reference**: a maximal identifier run shaped like uppercase letters followed
//!   by digits (`A1`, `J10`, `AA1`). Whether it names a real cell is the resolver's call.
//! - **Text**: everything else, copied through unchanged. Identifiers of any other
//!   shape (`SQRT`, `x1`, `A1_2`) and the contents of string literals are never
//!   treated as references.
//!
//! A number directly followed by letters (`2A1`) ends the number before the
//! identifier starts, so the `A1` in it is still a reference.

/// One piece of a tokenized formula expression.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// A reference-shaped identifier and its byte offset in the expression.
    Reference { label: &'a str, offset: usize },
    /// Literal expression text between references.
    Text(&'a str),
}

/// Split a formula expression (without its leading `=`) into tokens.
pub fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let bytes = expr.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'"' {
            i = skip_string_literal(bytes, i);
            continue;
        }

        if b.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            continue;
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let run = &expr[start..i];
            if is_reference_shape(run) {
                if text_start < start {
                    tokens.push(Token::Text(&expr[text_start..start]));
                }
                tokens.push(Token::Reference {
                    label: run,
                    offset: start,
                });
                text_start = i;
            }
            continue;
        }

        i += 1;
    }

    if text_start < expr.len() {
        tokens.push(Token::Text(&expr[text_start..]));
    }
    tokens
}

/// Labels of all reference tokens, in order of appearance (duplicates kept).
pub fn references(expr: &str) -> Vec<&str> {
    tokenize(expr)
        .into_iter()
        .filter_map(|token| match token {
            Token::Reference { label, .. } => Some(label),
            Token::Text(_) => None,
        })
        .collect()
}

/// Rebuild the expression with every reference replaced by `lookup(label)`.
pub fn substitute_references<F>(expr: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(expr.len());
    for token in tokenize(expr) {
        match token {
            Token::Reference { label, .. } => out.push_str(&lookup(label)),
            Token::Text(text) => out.push_str(text),
        }
    }
    out
}

/// Whole identifier runs only: `AA1` and `LOG10` are single references that
/// name no cell, where a bare `[A-Z][0-9]+` substring scan would find `A1`
/// and `G10` inside them.
fn is_reference_shape(run: &str) -> bool {
    let letters = run.bytes().take_while(|b| b.is_ascii_uppercase()).count();
    letters > 0 && letters < run.len() && run.bytes().skip(letters).all(|b| b.is_ascii_digit())
}

/// Returns the index just past the closing quote (or the end of input for an
/// unterminated literal). `start` points at the opening quote.
pub(crate) fn skip_string_literal(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(expr: &str) -> Vec<&str> {
        references(expr)
    }

    #[test]
    fn test_tokenize_simple_expression() {
        assert_eq!(
            tokenize("A1+B2*3"),
            vec![
                Token::Reference {
                    label: "A1",
                    offset: 0
                },
                Token::Text("+"),
                Token::Reference {
                    label: "B2",
                    offset: 3
                },
                Token::Text("*3"),
            ]
        );
    }

    #[test]
    fn test_tokenize_without_references() {
        assert_eq!(tokenize("2 + 2"), vec![Token::Text("2 + 2")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_function_names_are_not_references() {
        assert_eq!(refs("SQRT(A1)"), vec!["A1"]);
        assert_eq!(refs("x1 + a1"), Vec::<&str>::new());
        assert_eq!(refs("A1_2"), Vec::<&str>::new());
    }

    #[test]
    fn test_multi_letter_references_are_tokens() {
        // Shape matches; resolution decides they name no cell.
        assert_eq!(refs("AA1 + Z99"), vec!["AA1", "Z99"]);
    }

    #[test]
    fn test_number_prefix_ends_before_reference() {
        assert_eq!(refs("2A1"), vec!["A1"]);
        assert_eq!(refs("1.5*B3"), vec!["B3"]);
    }

    #[test]
    fn test_string_literals_are_skipped() {
        assert_eq!(refs("\"A1\" + B1"), vec!["B1"]);
        assert_eq!(refs("\"say \\\"C3\\\"\" + D4"), vec!["D4"]);
        assert_eq!(refs("\"unterminated A1"), Vec::<&str>::new());
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        assert_eq!(refs("B1 + A1 + B1"), vec!["B1", "A1", "B1"]);
    }

    #[test]
    fn test_no_reference_inside_longer_identifier() {
        assert_eq!(refs("AA1+1"), vec!["AA1"]);
        assert_eq!(refs("LOG10(x)"), vec!["LOG10"]);
        assert_eq!(
            substitute_references("AA1+1", |label| if label == "A1" { "7" } else { "0" }.to_string()),
            "0+1"
        );
    }

    #[test]
    fn test_substitute_references() {
        let out = substitute_references("A1 + B1 * 2", |label| match label {
            "A1" => "5".to_string(),
            _ => "0".to_string(),
        });
        assert_eq!(out, "5 + 0 * 2");
    }

    #[test]
    fn test_substitute_preserves_non_ascii_text() {
        let out = substitute_references("\"é\" + A1", |_| "x".to_string());
        assert_eq!(out, "\"é\" + x");
    }
}
