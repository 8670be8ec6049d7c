//! printf-style number formatting for table values.

use std::fmt;
use std::str::FromStr;

use crate::error::{EgError, Result};

/// Conversion character of a format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%e` / `%E`: scientific notation.
    Exponent { upper: bool },
    /// `%f`: fixed point.
    Fixed,
    /// `%g`: shortest of fixed and scientific.
    General,
    /// `%d` / `%i`: integer, truncated toward zero.
    Integer,
}

/// Parsed numeric format such as `%.6e` or `%10.3f`.
///
/// Supports an optional `+` flag, a field width and a precision. Exponents
/// are written C-style with a sign and at least two digits.
///
/// ```
/// use eg_format::NumberFormat;
///
/// let fmt: NumberFormat = "%.3e".parse().unwrap();
/// assert_eq!(fmt.format(1234.5), "1.234e+03");
/// assert_eq!(NumberFormat::default().format(10.0), "1.000000e+01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    conversion: Conversion,
    precision: Option<usize>,
    width: usize,
    plus: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            conversion: Conversion::Exponent { upper: false },
            precision: Some(6),
            width: 0,
            plus: false,
        }
    }
}

impl NumberFormat {
    /// Parse a printf-style specifier.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || EgError::InvalidFormatSpec {
            spec: spec.to_string(),
        };
        let body = spec.trim().strip_prefix('%').ok_or_else(invalid)?;
        let (plus, body) = match body.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let conv_char = body.chars().last().ok_or_else(invalid)?;
        let numbers = &body[..body.len() - conv_char.len_utf8()];
        let (width, precision) = match numbers.split_once('.') {
            Some((w, p)) => (w, Some(p)),
            None => (numbers, None),
        };
        let width = if width.is_empty() {
            0
        } else {
            width.parse::<usize>().map_err(|_| invalid())?
        };
        let precision = match precision {
            Some("") => Some(0),
            Some(p) => Some(p.parse::<usize>().map_err(|_| invalid())?),
            None => None,
        };
        let conversion = match conv_char {
            'e' => Conversion::Exponent { upper: false },
            'E' => Conversion::Exponent { upper: true },
            'f' | 'F' => Conversion::Fixed,
            'g' | 'G' => Conversion::General,
            'd' | 'i' => Conversion::Integer,
            _ => return Err(invalid()),
        };
        Ok(Self {
            conversion,
            precision,
            width,
            plus,
        })
    }

    /// Conversion kind.
    #[must_use]
    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Format one value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let body = if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            let text = if value > 0.0 { "inf" } else { "-inf" };
            text.to_string()
        } else {
            let precision = self.precision.unwrap_or(6);
            match self.conversion {
                Conversion::Exponent { upper } => {
                    let text = format_exponent(value, precision);
                    if upper { text.to_uppercase() } else { text }
                }
                Conversion::Fixed => format!("{value:.precision$}"),
                Conversion::General => format_general(value, precision),
                Conversion::Integer => format!("{}", value.trunc() as i64),
            }
        };
        let body = if self.plus && !body.starts_with('-') {
            format!("+{body}")
        } else {
            body
        };
        format!("{body:>width$}", width = self.width)
    }
}

impl FromStr for NumberFormat {
    type Err = EgError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("%")?;
        if self.plus {
            f.write_str("+")?;
        }
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        let conv = match self.conversion {
            Conversion::Exponent { upper: false } => 'e',
            Conversion::Exponent { upper: true } => 'E',
            Conversion::Fixed => 'f',
            Conversion::General => 'g',
            Conversion::Integer => 'd',
        };
        write!(f, "{conv}")
    }
}

/// `{:e}` with a C-style exponent (`e+01` rather than `e1`).
fn format_exponent(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    let sci = format!("{:.*e}", precision - 1, value);
    let exponent: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        let text = format_exponent(value, precision - 1);
        match text.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", trim_fraction(mantissa)),
            None => text,
        }
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
