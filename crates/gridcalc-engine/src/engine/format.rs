use super::Dynamic;

/// Format an evaluation result for display.
/// Returns None for values with no display form (unit, arrays, maps, functions).
pub fn format_dynamic(value: &Dynamic) -> Option<String> {
    if value.is_unit() {
        None
    } else if let Ok(n) = value.as_float() {
        Some(format_number(n))
    } else if let Ok(n) = value.as_int() {
        Some(n.to_string())
    } else if let Ok(b) = value.as_bool() {
        Some(b.to_string())
    } else if let Ok(c) = value.as_char() {
        Some(c.to_string())
    } else if value.is_string() {
        value.clone().into_string().ok()
    } else {
        None
    }
}

/// Format a number for display: integral values without a fractional part,
/// everything else in the shortest form that reads back to the same value.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Also catches -0.0.
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
