//! Token value expressions.
//!
//! Transformers produce an [`Expr`] tree; the emitter is the only stage that
//! knows the target runtime's syntax. The canonical [`Display`] form is what
//! [`crate::deps`] scans for references.

use std::fmt;

/// Key the runtime resolves as the dark-mode flag. Never a token.
pub const DARK_MODE_FLAG: &str = "dark-mode";

/// An sRGB color literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// The value of a single token.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal color.
    Color(Rgb),
    /// A bare numeric literal, kept verbatim (`"1.5"`, `"-4"`).
    Number(String),
    /// CSS pixels the runtime scales to device pixels.
    ScaledPixel(i64),
    /// The value of another token.
    Reference(String),
    /// Resolved against the runtime's dark-mode flag at initialization.
    DarkMode { dark: Box<Expr>, light: Box<Expr> },
    /// A call to the runtime's "get or create font" operation.
    Font {
        family: String,
        size: String,
        bold: bool,
    },
}

impl Expr {
    pub fn reference(key: impl Into<String>) -> Self {
        Expr::Reference(key.into())
    }

    pub fn dark_mode(dark: Expr, light: Expr) -> Self {
        Expr::DarkMode {
            dark: Box::new(dark),
            light: Box::new(light),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Color(rgb) => write!(f, "\"{}\"", rgb.to_hex()),
            Expr::Number(n) => f.write_str(n),
            Expr::ScaledPixel(px) => write!(f, "scale_pixel({px})"),
            Expr::Reference(key) => write!(f, "var({key})"),
            Expr::DarkMode { dark, light } => {
                write!(f, "var({DARK_MODE_FLAG}) ? {dark} : {light}")
            }
            Expr::Font { family, size, bold } => {
                let weight = if *bold { "bold" } else { "normal" };
                write!(f, "font({}, {size}, {weight})", quote(family))
            }
        }
    }
}

/// Double-quote a string, escaping `"`, `\` and control characters.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' || c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}
