//! Built-in spreadsheet functions (Rust) and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing built-in names are ALL CAPS (e.g. `ABS`, `ROUND`).
//! - Every argument is a float: the evaluator turns integer literals into floats
//!   before Rhai sees them.
//! - If you add a built-in, list it in `BUILTINS` and register it in `register_builtins`.

use rhai::Engine;

pub struct Builtin {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "ABS",
        signature: "ABS(x)",
        description: "Absolute value",
    },
    Builtin {
        name: "SQRT",
        signature: "SQRT(x)",
        description: "Square root (negative input is an error)",
    },
    Builtin {
        name: "ROUND",
        signature: "ROUND(x) / ROUND(x, digits)",
        description: "Round half away from zero, optionally to a number of decimal digits",
    },
    Builtin {
        name: "FLOOR",
        signature: "FLOOR(x)",
        description: "Largest integer not above x",
    },
    Builtin {
        name: "CEIL",
        signature: "CEIL(x)",
        description: "Smallest integer not below x",
    },
    Builtin {
        name: "MIN",
        signature: "MIN(a, b)",
        description: "Smaller of two values",
    },
    Builtin {
        name: "MAX",
        signature: "MAX(a, b)",
        description: "Larger of two values",
    },
    Builtin {
        name: "AVG",
        signature: "AVG(a, b)",
        description: "Mean of two values",
    },
    Builtin {
        name: "POW",
        signature: "POW(a, b)",
        description: "a raised to the power b (same as a ^ b)",
    },
    Builtin {
        name: "MOD",
        signature: "MOD(a, b)",
        description: "Remainder with the sign of the divisor",
    },
    Builtin {
        name: "PI",
        signature: "PI()",
        description: "The constant pi",
    },
];

pub(crate) fn register_builtins(engine: &mut Engine) {
    engine.register_fn("ABS", |x: f64| x.abs());
    engine.register_fn("SQRT", |x: f64| x.sqrt());
    engine.register_fn("ROUND", |x: f64| x.round());
    engine.register_fn("ROUND", |x: f64, digits: f64| {
        let factor = 10f64.powi(digits as i32);
        (x * factor).round() / factor
    });
    engine.register_fn("FLOOR", |x: f64| x.floor());
    engine.register_fn("CEIL", |x: f64| x.ceil());
    engine.register_fn("MIN", |a: f64, b: f64| a.min(b));
    engine.register_fn("MAX", |a: f64, b: f64| a.max(b));
    engine.register_fn("AVG", |a: f64, b: f64| (a + b) / 2.0);
    engine.register_fn("POW", |a: f64, b: f64| a.powf(b));
    engine.register_fn("MOD", |a: f64, b: f64| a - b * (a / b).floor());
    engine.register_fn("PI", || std::f64::consts::PI);
}
