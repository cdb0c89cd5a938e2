//! Typed values for parsed tokens.

use std::fmt;
use std::rc::Rc;

use crate::Context;
use crate::error::Error;
use crate::escape::{descape, escape};
use crate::lookup::lookup;

/// Unit suffixes recognized for measure literals, longest first so a
/// suffix check never strips a shorter unit out of a longer one
/// (`vmin` before `in`).
pub const UNITS: [&str; 26] = [
    "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "rem", "rlh",
    "cm", "mm", "in", "pc", "pt", "px", "em", "ex", "ch", "lh", "vw", "vh",
    "vb", "vi", "Q", "%",
];

/// One parsed value together with the literal text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub(crate) source: String,
    pub(crate) kind: Kind,
}

/// Semantic kind of a parsed token.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Boolean(bool),
    Nil,
    Integer(i64),
    Float(f64),
    Hex(Hex),
    Measure(Measure),
    Color(Color),
    Quoted(Quoted),
    Path(Path),
    Variable(Variable),
}

/// Generic hex blob: `#` followed by hex digits in a length other than
/// the color forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Hex {
    pub raw: u128,
    pub bytes: Vec<u8>,
}

/// Numeric part of a measure, split by the presence of a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// Numeric literal with a recognized unit suffix, e.g. `10px` or `1.5em`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub number: Number,
    pub unit: &'static str,
}

/// Color literal: `#` followed by 3, 4, 6 or 8 hex digits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Option<u8>,
}

/// Which quote character a quoted literal was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quotes {
    Single,
    Double,
}

/// Quoted string literal with its decoded content.
#[derive(Debug, Clone, PartialEq)]
pub struct Quoted {
    pub value: String,
    pub quotes: Quotes,
}

/// Plain or `@`-prefixed string, treated as a lookup path or bare word.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub value: String,
    pub signed: bool,
}

/// Deferred reference to a name in the render context. Starts unbound;
/// binds to a context exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    braced: bool,
    context: Option<Rc<Context>>,
}

impl Variable {
    /// Dotted name of the reference.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the reference was written in `{{ ... }}` form.
    pub fn braced(&self) -> bool {
        self.braced
    }

    pub fn bound(&self) -> bool {
        self.context.is_some()
    }

    pub(crate) fn attach(&mut self, context: Rc<Context>) -> Result<(), Error> {
        if self.context.is_some() {
            return Err(Error::ContextAttached);
        }
        self.context = Some(context);
        Ok(())
    }

    /// Resolve against the bound context. Dotted names index segment by
    /// segment; a missing segment yields `Ok(None)` rather than an error.
    pub fn resolve(&self) -> Result<Option<&Context>, Error> {
        match &self.context {
            Some(context) => Ok(lookup(context, &self.name)),
            None => Err(Error::NoContext),
        }
    }
}

impl Value {
    /// Classify a single literal token.
    pub fn classify(token: &str) -> Result<Self, Error> {
        classify(&escape(token))
    }

    /// Original literal text of the token.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Boolean `true` with no literal source, used for bare flag keys.
    pub(crate) fn flag() -> Self {
        Value {
            source: String::new(),
            kind: Kind::Boolean(true),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Classify one raw, still-escaped token into a typed value.
pub(crate) fn classify(raw: &str) -> Result<Value, Error> {
    let kind = match raw {
        "true" => Kind::Boolean(true),
        "false" => Kind::Boolean(false),
        "nil" => Kind::Nil,
        _ => classify_form(raw)?,
    };
    Ok(Value {
        source: descape(raw),
        kind,
    })
}

/// Literal-form tests in priority order; a token matching none of them
/// is kept as a bare string path.
fn classify_form(raw: &str) -> Result<Kind, Error> {
    if let Some((name, braced)) = variable_name(raw) {
        return Ok(Kind::Variable(Variable {
            name: name.to_string(),
            braced,
            context: None,
        }));
    }
    if let Some(rest) = raw.strip_prefix('@') {
        return Ok(Kind::Path(Path {
            value: path_text(rest)?,
            signed: true,
        }));
    }
    if let Some(digits) = raw.strip_prefix('#') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return hex_kind(raw, digits);
        }
    }
    if is_digits(raw) {
        let value = raw
            .parse::<i64>()
            .map_err(|_| literal_error(raw, "integer"))?;
        return Ok(Kind::Integer(value));
    }
    if is_float(raw) {
        let value = raw.parse::<f64>().map_err(|_| literal_error(raw, "float"))?;
        return Ok(Kind::Float(value));
    }
    if let Some(measure) = measure(raw)? {
        return Ok(Kind::Measure(measure));
    }
    if raw.starts_with('\'') || raw.starts_with('"') {
        return Ok(Kind::Quoted(quoted(raw)?));
    }
    Ok(Kind::Path(Path {
        value: descape(raw),
        signed: false,
    }))
}

/// Match the variable reference forms: `{{ name }}` (optionally with
/// whitespace-control dashes) or a bare identifier path.
fn variable_name(raw: &str) -> Option<(&str, bool)> {
    if let Some(inner) = raw.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) {
        let inner = inner.strip_prefix('-').unwrap_or(inner);
        let inner = inner.strip_suffix('-').unwrap_or(inner);
        let name = inner.trim();
        return is_ident_path(name).then_some((name, true));
    }
    is_ident_path(raw).then_some((raw, false))
}

fn is_ident_path(text: &str) -> bool {
    let mut bytes = text.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

/// Text of an `@`-prefixed path; a quoted remainder is unquoted first.
fn path_text(rest: &str) -> Result<String, Error> {
    if rest.starts_with('\'') || rest.starts_with('"') {
        Ok(quoted(rest)?.value)
    } else {
        Ok(descape(rest))
    }
}

fn hex_kind(raw: &str, digits: &str) -> Result<Kind, Error> {
    let d = digits.as_bytes();
    match d.len() {
        3 => Ok(Kind::Color(Color {
            red: doubled(d[0]),
            green: doubled(d[1]),
            blue: doubled(d[2]),
            alpha: None,
        })),
        4 => Ok(Kind::Color(Color {
            red: doubled(d[0]),
            green: doubled(d[1]),
            blue: doubled(d[2]),
            alpha: Some(doubled(d[3])),
        })),
        6 => Ok(Kind::Color(Color {
            red: hex_byte(d[0], d[1]),
            green: hex_byte(d[2], d[3]),
            blue: hex_byte(d[4], d[5]),
            alpha: None,
        })),
        8 => Ok(Kind::Color(Color {
            red: hex_byte(d[0], d[1]),
            green: hex_byte(d[2], d[3]),
            blue: hex_byte(d[4], d[5]),
            alpha: Some(hex_byte(d[6], d[7])),
        })),
        1 | 2 => Err(literal_error(raw, "hex color")),
        _ => {
            let value =
                u128::from_str_radix(digits, 16).map_err(|_| literal_error(raw, "hex"))?;
            // Bytes are taken in pairs; an odd trailing nibble is dropped.
            let bytes = d
                .chunks_exact(2)
                .map(|pair| hex_byte(pair[0], pair[1]))
                .collect();
            Ok(Kind::Hex(Hex { raw: value, bytes }))
        }
    }
}

fn measure(raw: &str) -> Result<Option<Measure>, Error> {
    for unit in UNITS {
        let Some(number) = raw.strip_suffix(unit) else {
            continue;
        };
        if is_digits(number) {
            let value = number
                .parse::<i64>()
                .map_err(|_| literal_error(raw, "measure"))?;
            return Ok(Some(Measure {
                number: Number::Integer(value),
                unit,
            }));
        }
        if is_float(number) {
            let value = number
                .parse::<f64>()
                .map_err(|_| literal_error(raw, "measure"))?;
            return Ok(Some(Measure {
                number: Number::Float(value),
                unit,
            }));
        }
    }
    Ok(None)
}

fn quoted(raw: &str) -> Result<Quoted, Error> {
    let (open, quotes) = if raw.starts_with('\'') {
        ('\'', Quotes::Single)
    } else {
        ('"', Quotes::Double)
    };
    let inner = raw[1..]
        .strip_suffix(open)
        .ok_or_else(|| literal_error(raw, "quoted string"))?;
    Ok(Quoted {
        value: descape(inner),
        quotes,
    })
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => false,
    }
}

fn literal_error(raw: &str, what: &'static str) -> Error {
    Error::Literal {
        token: descape(raw),
        what,
    }
}

fn hex_byte(hi: u8, lo: u8) -> u8 {
    (hex_nibble(hi) << 4) | hex_nibble(lo)
}

/// Spread one hex digit over both nibbles of a byte (`a` -> `0xAA`).
fn doubled(digit: u8) -> u8 {
    hex_nibble(digit) * 0x11
}

/// Callers validate with `is_ascii_hexdigit` first.
fn hex_nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
