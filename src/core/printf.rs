//! Runtime printf-style template rendering.
//!
//! Arguments are consumed by position and checked against the conversion
//! specifier they land on. Any mismatch, missing argument or leftover
//! argument is reported as [`LoggerError::FormatError`] instead of being
//! rendered as garbage.
//!
//! Supported conversions: `%d %i %u %x %X %o %f %F %e %E %g %G %s %c %p %%`
//! with the flags `- + space 0 #`, a numeric width and a numeric precision.
//! Length modifiers (`h`, `l`, `ll`, `z`, ...) are accepted and ignored.

use super::error::{LoggerError, Result};
use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

/// Largest width or precision a directive may request
pub const MAX_FIELD_WIDTH: usize = u16::MAX as usize;

/// One positional argument of a templated call.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Bool(bool),
    Pointer(usize),
}

impl FormatArg<'_> {
    fn kind(&self) -> &'static str {
        match self {
            FormatArg::Str(_) => "string",
            FormatArg::Int(_) => "signed integer",
            FormatArg::UInt(_) => "unsigned integer",
            FormatArg::Float(_) => "floating point",
            FormatArg::Char(_) => "char",
            FormatArg::Bool(_) => "bool",
            FormatArg::Pointer(_) => "pointer",
        }
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(value: &'a str) -> Self {
        FormatArg::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(value: &'a String) -> Self {
        FormatArg::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for FormatArg<'_> {
    fn from(value: String) -> Self {
        FormatArg::Str(Cow::Owned(value))
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(value: $t) -> Self {
                FormatArg::Int(value as i64)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(value: $t) -> Self {
                FormatArg::UInt(value as u64)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FormatArg<'_> {
    fn from(value: f32) -> Self {
        FormatArg::Float(value as f64)
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<char> for FormatArg<'_> {
    fn from(value: char) -> Self {
        FormatArg::Char(value)
    }
}

impl From<bool> for FormatArg<'_> {
    fn from(value: bool) -> Self {
        FormatArg::Bool(value)
    }
}

impl<T> From<*const T> for FormatArg<'_> {
    fn from(value: *const T) -> Self {
        FormatArg::Pointer(value as usize)
    }
}

impl<T> From<*mut T> for FormatArg<'_> {
    fn from(value: *mut T) -> Self {
        FormatArg::Pointer(value as usize)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Directive {
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

/// Render `template`, substituting `args` by position.
///
/// # Examples
///
/// ```
/// use prefix_logger::core::string_utils::{format_string, FormatArg};
///
/// let out = format_string("%s has %d items", &["cart".into(), 3.into()]).unwrap();
/// assert_eq!(out, "cart has 3 items");
///
/// let err = format_string("%d", &[FormatArg::from("three")]);
/// assert!(err.is_err());
/// ```
pub fn format_string(template: &str, args: &[FormatArg<'_>]) -> Result<String> {
    let mut output = String::with_capacity(template.len() + 16 * args.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            output.push('%');
            continue;
        }

        let directive = parse_directive(template, &mut chars)?;
        let arg = remaining.next().ok_or_else(|| {
            LoggerError::format(
                template,
                format!("too few arguments: missing value for %{}", directive.conversion),
            )
        })?;
        output.push_str(&render(template, &directive, arg)?);
    }

    let leftover = remaining.count();
    if leftover > 0 {
        return Err(LoggerError::format(
            template,
            format!("too many arguments: {} left unused", leftover),
        ));
    }
    Ok(output)
}

fn parse_directive(template: &str, chars: &mut Peekable<Chars<'_>>) -> Result<Directive> {
    let mut directive = Directive::default();

    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => directive.left_align = true,
            '+' => directive.plus_sign = true,
            ' ' => directive.space_sign = true,
            '0' => directive.zero_pad = true,
            '#' => directive.alternate = true,
            _ => break,
        }
        chars.next();
    }

    if chars.peek() == Some(&'*') {
        return Err(LoggerError::format(template, "'*' width is not supported"));
    }
    directive.width = read_field(template, chars, "width")?.unwrap_or(0);

    if chars.peek() == Some(&'.') {
        chars.next();
        if chars.peek() == Some(&'*') {
            return Err(LoggerError::format(template, "'*' precision is not supported"));
        }
        directive.precision = Some(read_field(template, chars, "precision")?.unwrap_or(0));
    }

    while let Some(&modifier) = chars.peek() {
        if matches!(modifier, 'h' | 'l' | 'L' | 'q' | 'j' | 'z' | 't') {
            chars.next();
        } else {
            break;
        }
    }

    match chars.next() {
        Some(
            conversion @ ('d' | 'i' | 'u' | 'x' | 'X' | 'o' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G'
            | 's' | 'c' | 'p'),
        ) => {
            directive.conversion = conversion;
            Ok(directive)
        }
        Some(other) => Err(LoggerError::format(
            template,
            format!("unsupported conversion specifier %{}", other),
        )),
        None => Err(LoggerError::format(template, "dangling '%' at end of template")),
    }
}

fn read_field(
    template: &str,
    chars: &mut Peekable<Chars<'_>>,
    field: &str,
) -> Result<Option<usize>> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let next = value.unwrap_or(0) * 10 + digit as usize;
        if next > MAX_FIELD_WIDTH {
            return Err(LoggerError::format(
                template,
                format!("{} out of range (max {})", field, MAX_FIELD_WIDTH),
            ));
        }
        value = Some(next);
    }
    Ok(value)
}

fn mismatch(template: &str, directive: &Directive, arg: &FormatArg<'_>) -> LoggerError {
    LoggerError::format(
        template,
        format!("%{} cannot render a {} argument", directive.conversion, arg.kind()),
    )
}

fn render(template: &str, directive: &Directive, arg: &FormatArg<'_>) -> Result<String> {
    match directive.conversion {
        'd' | 'i' => {
            let value: i128 = match arg {
                FormatArg::Int(v) => *v as i128,
                FormatArg::UInt(v) => *v as i128,
                FormatArg::Bool(v) => *v as i128,
                FormatArg::Char(v) => *v as u32 as i128,
                _ => return Err(mismatch(template, directive, arg)),
            };
            Ok(render_integer(directive, value < 0, value.unsigned_abs().to_string(), ""))
        }
        'u' | 'x' | 'X' | 'o' => {
            let value: u64 = match arg {
                FormatArg::UInt(v) => *v,
                // two's complement reinterpretation, as a C `unsigned` conversion would
                FormatArg::Int(v) => *v as u64,
                FormatArg::Bool(v) => *v as u64,
                FormatArg::Char(v) => *v as u64,
                _ => return Err(mismatch(template, directive, arg)),
            };
            let (digits, alt) = match directive.conversion {
                'x' => (format!("{:x}", value), "0x"),
                'X' => (format!("{:X}", value), "0X"),
                'o' => (format!("{:o}", value), "0"),
                _ => (value.to_string(), ""),
            };
            let alt = if directive.alternate && value != 0 { alt } else { "" };
            Ok(render_integer(directive, false, digits, alt))
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
            let value = match arg {
                FormatArg::Float(v) => *v,
                FormatArg::Int(v) => *v as f64,
                FormatArg::UInt(v) => *v as f64,
                _ => return Err(mismatch(template, directive, arg)),
            };
            Ok(render_float(directive, value))
        }
        's' => {
            let text: Cow<'_, str> = match arg {
                FormatArg::Str(s) => Cow::Borrowed(s.as_ref()),
                FormatArg::Char(c) => Cow::Owned(c.to_string()),
                FormatArg::Bool(b) => Cow::Owned(b.to_string()),
                _ => return Err(mismatch(template, directive, arg)),
            };
            let text = match directive.precision {
                Some(max) => text.chars().take(max).collect::<String>(),
                None => text.into_owned(),
            };
            Ok(pad(directive, "", &text, false))
        }
        'c' => {
            let c = match arg {
                FormatArg::Char(c) => *c,
                FormatArg::Int(v) => u32::try_from(*v)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| mismatch(template, directive, arg))?,
                FormatArg::UInt(v) => u32::try_from(*v)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| mismatch(template, directive, arg))?,
                _ => return Err(mismatch(template, directive, arg)),
            };
            Ok(pad(directive, "", &c.to_string(), false))
        }
        'p' => match arg {
            FormatArg::Pointer(0) => Ok(pad(directive, "", "(nil)", false)),
            FormatArg::Pointer(address) => {
                Ok(pad(directive, "0x", &format!("{:x}", address), false))
            }
            _ => Err(mismatch(template, directive, arg)),
        },
        other => Err(LoggerError::format(
            template,
            format!("unsupported conversion specifier %{}", other),
        )),
    }
}

fn sign_str(directive: &Directive, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if directive.plus_sign {
        "+"
    } else if directive.space_sign {
        " "
    } else {
        ""
    }
}

fn render_integer(directive: &Directive, negative: bool, mut digits: String, alt: &str) -> String {
    if let Some(min_digits) = directive.precision {
        if min_digits == 0 && digits == "0" {
            digits.clear();
        } else if digits.len() < min_digits {
            digits.insert_str(0, &"0".repeat(min_digits - digits.len()));
        }
    }
    let signed = matches!(directive.conversion, 'd' | 'i');
    let sign = if signed { sign_str(directive, negative) } else { "" };
    let prefix = format!("{}{}", sign, alt);
    // a precision disables zero padding for integer conversions
    pad(directive, &prefix, &digits, directive.precision.is_none())
}

fn render_float(directive: &Directive, value: f64) -> String {
    let upper = directive.conversion.is_ascii_uppercase();
    let sign = sign_str(directive, value.is_sign_negative() && !value.is_nan());

    if !value.is_finite() {
        let body = if value.is_nan() { "nan" } else { "inf" };
        let body = if upper { body.to_uppercase() } else { body.to_string() };
        return pad(directive, sign, &body, false);
    }

    let magnitude = value.abs();
    let precision = directive.precision.unwrap_or(6);
    let body = match directive.conversion.to_ascii_lowercase() {
        'f' => format!("{:.*}", precision, magnitude),
        'e' => exponent_form(magnitude, precision),
        _ => general_form(magnitude, precision, directive.alternate),
    };
    let body = if upper { body.to_uppercase() } else { body };
    pad(directive, sign, &body, true)
}

/// C-style `%e`: mantissa, `e`, sign and at least two exponent digits.
fn exponent_form(magnitude: f64, precision: usize) -> String {
    let rust = format!("{:.*e}", precision, magnitude);
    match rust.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => rust,
    }
}

fn general_form(magnitude: f64, precision: usize, alternate: bool) -> String {
    let significant = precision.max(1);
    let exponent = if magnitude == 0.0 {
        0
    } else {
        let rounded = format!("{:.*e}", significant - 1, magnitude);
        rounded
            .split_once('e')
            .and_then(|(_, e)| e.parse::<i64>().ok())
            .unwrap_or(0)
    };

    let body = if exponent < -4 || exponent >= significant as i64 {
        exponent_form(magnitude, significant - 1)
    } else {
        let decimals = (significant as i64 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, magnitude)
    };

    if alternate {
        return body;
    }
    trim_fraction_zeros(&body)
}

fn trim_fraction_zeros(body: &str) -> String {
    let (mantissa, exponent) = match body.find('e') {
        Some(idx) => body.split_at(idx),
        None => (body, ""),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    format!("{}{}", mantissa, exponent)
}

/// Apply width, alignment and zero padding around `prefix` + `body`.
fn pad(directive: &Directive, prefix: &str, body: &str, zero_allowed: bool) -> String {
    let len = prefix.chars().count() + body.chars().count();
    if len >= directive.width {
        return format!("{}{}", prefix, body);
    }
    let fill = directive.width - len;
    if directive.left_align {
        format!("{}{}{}", prefix, body, " ".repeat(fill))
    } else if directive.zero_pad && zero_allowed {
        format!("{}{}{}", prefix, "0".repeat(fill), body)
    } else {
        format!("{}{}{}", " ".repeat(fill), prefix, body)
    }
}
