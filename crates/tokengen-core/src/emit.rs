//! Renders sorted tokens as a Rust module for the theming runtime.
//!
//! Every token becomes one `let` binding inside a generic `init` function, in
//! the order given, so later bindings can use earlier ones. This is the only
//! module that knows the target syntax.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use phf::phf_set;

use crate::config::EmitConfig;
use crate::expr::{quote, Expr};
use crate::loader::Token;

/// Rust keywords and reserved words; keys matching these become raw identifiers.
static RUST_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match",
    "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become",
    "box", "do", "final", "gen", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
};

/// Keywords that cannot be raw identifiers, the names `init` itself binds, and
/// names a `let` pattern would resolve to a variant or constant.
const UNUSABLE_IDENTS: &[&str] = &[
    "self", "Self", "super", "crate", "_", "rt", "dark_mode", "tokens", "Some", "None", "Ok",
    "Err", "TOKEN_COUNT", "TokenValue",
];

/// Render the generated module.
pub fn emit(tokens: &[&Token], config: &EmitConfig, generated_at: DateTime<Utc>) -> String {
    let idents = Idents::assign(tokens.iter().map(|t| t.key.as_str()));
    let mut out = String::new();

    // ── Header ──────────────────────────────────────────────────────
    out.push_str(&format!(
        "// @generated by {} {} on {}\n",
        config.tool_name,
        env!("CARGO_PKG_VERSION"),
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str("// Do not edit by hand.\n\n");

    out.push_str("#[allow(dead_code, non_snake_case, unused_mut, unused_variables, clippy::all)]\n");
    out.push_str(&format!("pub mod {} {{\n", config.module));
    out.push_str(&format!("    use {}::ThemeRuntime;\n\n", config.runtime_path));
    out.push_str(VALUE_TYPE);
    out.push_str(&format!(
        "    /// Number of tokens `init` produces.\n    pub const TOKEN_COUNT: usize = {};\n\n",
        tokens.len()
    ));

    // ── Declarations ────────────────────────────────────────────────
    out.push_str("    /// Initialize every token, each after the tokens it uses.\n");
    out.push_str(
        "    pub fn init<R: ThemeRuntime>(rt: &mut R) -> Vec<(&'static str, TokenValue<R::Font>)> {\n",
    );
    out.push_str("        let dark_mode = rt.dark_mode();\n");
    out.push_str("        let mut tokens = Vec::with_capacity(TOKEN_COUNT);\n");

    for token in tokens {
        let ident = idents.get(&token.key);
        out.push_str(&format!(
            "        let {ident} = {};\n",
            render(&token.value, &idents)
        ));
        out.push_str(&format!(
            "        tokens.push(({}, {ident}.clone()));\n",
            quote(&token.key)
        ));
    }

    out.push_str("        tokens\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

const VALUE_TYPE: &str = "    /// A resolved design-token value.
    #[derive(Debug, Clone, PartialEq)]
    pub enum TokenValue<F> {
        Color(&'static str),
        Pixels(i64),
        Number(f64),
        Font(F),
    }

";

/// Render one expression as a Rust expression of type `TokenValue<_>`.
fn render(expr: &Expr, idents: &Idents) -> String {
    match expr {
        Expr::Color(rgb) => format!("TokenValue::Color({})", quote(&rgb.to_hex())),
        Expr::Number(n) => format!("TokenValue::Number({})", float_literal(n)),
        Expr::ScaledPixel(px) => format!("TokenValue::Pixels(rt.scale_pixel({px}))"),
        Expr::Reference(key) => format!("{}.clone()", idents.get(key)),
        Expr::DarkMode { dark, light } => format!(
            "if dark_mode {{ {} }} else {{ {} }}",
            render(dark, idents),
            render(light, idents)
        ),
        Expr::Font { family, size, bold } => format!(
            "TokenValue::Font(rt.get_or_create_font({}, {}, {bold}))",
            quote(family),
            float_literal(size)
        ),
    }
}

/// `1` → `1.0`; decimals are left alone.
fn float_literal(n: &str) -> String {
    if n.contains('.') || n.contains('e') || n.contains('E') {
        n.to_string()
    } else {
        format!("{n}.0")
    }
}

/// Token key → unique Rust identifier.
struct Idents {
    by_key: HashMap<String, String>,
}

impl Idents {
    fn assign<'a>(keys: impl Iterator<Item = &'a str>) -> Self {
        let mut by_key = HashMap::new();
        let mut used: HashSet<String> = HashSet::new();
        for key in keys {
            let base = mangle(key);
            let mut ident = base.clone();
            let mut n = 2;
            while used.contains(&ident) {
                ident = format!("{base}_{n}");
                n += 1;
            }
            used.insert(ident.clone());
            by_key.insert(key.to_string(), ident);
        }
        Self { by_key }
    }

    /// Identifier for `key`. Keys that were never declared (a reference into
    /// a dropped cycle member) get their plain mangled name.
    fn get(&self, key: &str) -> String {
        self.by_key.get(key).cloned().unwrap_or_else(|| mangle(key))
    }
}

/// Turn a token key into a Rust identifier.
pub fn mangle(key: &str) -> String {
    let mut ident: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if UNUSABLE_IDENTS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::expr::Rgb;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn token(key: &str, value: Expr) -> Token {
        Token {
            key: key.into(),
            raw: Value::Null,
            value,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_mangle() {
        assert_eq!(mangle("gray-400"), "gray_400");
        assert_eq!(mangle("100-percent"), "_100_percent");
        assert_eq!(mangle("type"), "r#type");
        assert_eq!(mangle("self"), "self_");
        assert_eq!(mangle("tokens"), "tokens_");
        assert_eq!(mangle("a.b"), "a_b");
    }

    #[test]
    fn test_prelude_variants_not_used_as_bindings() {
        assert_eq!(mangle("Some"), "Some_");
        assert_eq!(mangle("None"), "None_");
        assert_eq!(mangle("Ok"), "Ok_");
        assert_eq!(mangle("Err"), "Err_");
        assert_eq!(mangle("TOKEN_COUNT"), "TOKEN_COUNT_");
        assert_eq!(mangle("TokenValue"), "TokenValue_");
        assert_eq!(mangle("some"), "some");

        let t = token("Some", Expr::Color(Rgb::new(1, 2, 3)));
        let output = emit(&[&t], &CompilerConfig::default().emit, fixed_time());
        assert!(output.contains("let Some_ = TokenValue::Color(\"#010203\");"));
        assert!(output.contains("tokens.push((\"Some\", Some_.clone()));"));
    }

    #[test]
    fn test_control_characters_escaped_in_keys() {
        let t = token("odd\rkey", Expr::ScaledPixel(1));
        let output = emit(&[&t], &CompilerConfig::default().emit, fixed_time());
        assert!(output.contains(r#"tokens.push(("odd\rkey", odd_key.clone()));"#));
    }

    #[test]
    fn test_colliding_keys_get_distinct_idents() {
        let idents = Idents::assign(["a-b", "a_b", "a.b"].into_iter());
        assert_eq!(idents.get("a-b"), "a_b");
        assert_eq!(idents.get("a_b"), "a_b_2");
        assert_eq!(idents.get("a.b"), "a_b_3");
    }

    #[test]
    fn test_render_expressions() {
        let idents = Idents::assign(["gray-50", "gray-900"].into_iter());
        assert_eq!(
            render(&Expr::Color(Rgb::new(255, 0, 128)), &idents),
            "TokenValue::Color(\"#FF0080\")"
        );
        assert_eq!(
            render(&Expr::Number("1".into()), &idents),
            "TokenValue::Number(1.0)"
        );
        assert_eq!(
            render(&Expr::Number("-1.5".into()), &idents),
            "TokenValue::Number(-1.5)"
        );
        assert_eq!(
            render(&Expr::ScaledPixel(-4), &idents),
            "TokenValue::Pixels(rt.scale_pixel(-4))"
        );
        assert_eq!(
            render(
                &Expr::dark_mode(Expr::reference("gray-900"), Expr::reference("gray-50")),
                &idents
            ),
            "if dark_mode { gray_900.clone() } else { gray_50.clone() }"
        );
        assert_eq!(
            render(
                &Expr::Font {
                    family: "Adobe Clean".into(),
                    size: "14".into(),
                    bold: false,
                },
                &idents
            ),
            "TokenValue::Font(rt.get_or_create_font(\"Adobe Clean\", 14.0, false))"
        );
    }

    #[test]
    fn test_full_module() {
        let base = token("gray-50", Expr::Color(Rgb::new(255, 255, 255)));
        let alias = token("bg", Expr::reference("gray-50"));
        let config = CompilerConfig::default().emit;
        let output = emit(&[&base, &alias], &config, fixed_time());

        let expected = format!(
            r##"// @generated by tokengen {version} on 2026-10-19T12:00:00Z
// Do not edit by hand.

#[allow(dead_code, non_snake_case, unused_mut, unused_variables, clippy::all)]
pub mod design_tokens {{
    use crate::theme::runtime::ThemeRuntime;

    /// A resolved design-token value.
    #[derive(Debug, Clone, PartialEq)]
    pub enum TokenValue<F> {{
        Color(&'static str),
        Pixels(i64),
        Number(f64),
        Font(F),
    }}

    /// Number of tokens `init` produces.
    pub const TOKEN_COUNT: usize = 2;

    /// Initialize every token, each after the tokens it uses.
    pub fn init<R: ThemeRuntime>(rt: &mut R) -> Vec<(&'static str, TokenValue<R::Font>)> {{
        let dark_mode = rt.dark_mode();
        let mut tokens = Vec::with_capacity(TOKEN_COUNT);
        let gray_50 = TokenValue::Color("#FFFFFF");
        tokens.push(("gray-50", gray_50.clone()));
        let bg = gray_50.clone();
        tokens.push(("bg", bg.clone()));
        tokens
    }}
}}
"##,
            version = env!("CARGO_PKG_VERSION")
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_config_controls_names() {
        let mut config = CompilerConfig::default().emit;
        config.module = "spectrum".into();
        config.runtime_path = "my_app::runtime".into();
        config.tool_name = "spectrum-gen".into();
        let output = emit(&[], &config, fixed_time());
        assert!(output.starts_with("// @generated by spectrum-gen "));
        assert!(output.contains("pub mod spectrum {"));
        assert!(output.contains("use my_app::runtime::ThemeRuntime;"));
        assert!(output.contains("TOKEN_COUNT: usize = 0;"));
    }

    #[test]
    fn test_only_timestamp_varies() {
        let t = token("space", Expr::ScaledPixel(8));
        let config = CompilerConfig::default().emit;
        let a = emit(&[&t], &config, fixed_time());
        let b = emit(&[&t], &config, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        let strip = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
        assert_ne!(a, b);
        assert_eq!(strip(&a), strip(&b));
    }
}
