//! Dispatch table for recognized `[Parameters]` keys.
//!
//! Keys are matched case-insensitively. Each key maps to a [`FieldKind`] that
//! decides how the raw text after `=` is coerced.

use crate::error::{EgError, Result};
use crate::types::ParamValue;

/// How a raw header value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Quoted or bare string.
    Str,
    /// Integer.
    Int,
    /// Comma separated strings.
    StrList,
    /// Comma separated integers.
    IntList,
}

/// Recognized parameter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Name,
    ShotNo,
    SubShotNo,
    Date,
    DimNo,
    DimName,
    DimSize,
    DimUnit,
    ValNo,
    ValName,
    ValUnit,
}

impl ParamKey {
    /// Every recognized key.
    pub const ALL: [ParamKey; 11] = [
        Self::Name,
        Self::ShotNo,
        Self::SubShotNo,
        Self::Date,
        Self::DimNo,
        Self::DimName,
        Self::DimSize,
        Self::DimUnit,
        Self::ValNo,
        Self::ValName,
        Self::ValUnit,
    ];

    /// Keys that must be present once parsing and overrides are done.
    pub const REQUIRED: [ParamKey; 10] = [
        Self::Name,
        Self::DimName,
        Self::DimUnit,
        Self::ValName,
        Self::ValUnit,
        Self::Date,
        Self::DimNo,
        Self::ValNo,
        Self::ShotNo,
        Self::DimSize,
    ];

    /// Spelling used when writing the key.
    #[must_use]
    pub const fn canonical(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::ShotNo => "ShotNo",
            Self::SubShotNo => "SubShotNo",
            Self::Date => "Date",
            Self::DimNo => "DimNo",
            Self::DimName => "DimName",
            Self::DimSize => "DimSize",
            Self::DimUnit => "DimUnit",
            Self::ValNo => "ValNo",
            Self::ValName => "ValName",
            Self::ValUnit => "ValUnit",
        }
    }

    /// Coercion applied to this key's value.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Name | Self::Date => FieldKind::Str,
            Self::ShotNo | Self::SubShotNo | Self::DimNo | Self::ValNo => FieldKind::Int,
            Self::DimName | Self::DimUnit | Self::ValName | Self::ValUnit => FieldKind::StrList,
            Self::DimSize => FieldKind::IntList,
        }
    }

    /// Resolve a key as written in a file or passed as an override.
    ///
    /// `diag` is accepted as an alias of `NAME`.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.eq_ignore_ascii_case("diag") {
            return Some(Self::Name);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.canonical().eq_ignore_ascii_case(key))
    }

    /// Coerce raw header text into this key's typed value.
    pub fn extract(self, raw: &str) -> Result<ParamValue> {
        extract(self.kind(), self.canonical(), raw)
    }

    /// Coerce an override value into this key's kind.
    ///
    /// Values of the matching variant pass through; strings are parsed as if
    /// they had been read from a file.
    pub fn coerce(self, value: &ParamValue) -> Result<ParamValue> {
        let key = self.canonical();
        let coerced = match (self.kind(), value) {
            (FieldKind::Str, ParamValue::Str(_))
            | (FieldKind::Int, ParamValue::Int(_))
            | (FieldKind::StrList, ParamValue::StrList(_))
            | (FieldKind::IntList, ParamValue::IntList(_)) => Ok(value.clone()),
            (FieldKind::Str, ParamValue::Int(n)) => Ok(ParamValue::Str(n.to_string())),
            (FieldKind::IntList, ParamValue::Int(n)) => Ok(ParamValue::IntList(vec![*n])),
            (kind, ParamValue::Str(s)) => extract(kind, key, s),
            _ => Err(EgError::invalid_override(key)),
        };
        coerced.map_err(|_| EgError::invalid_override(key))
    }
}

/// Trim whitespace and drop quote characters.
pub(crate) fn unquote(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_int(key: &str, text: &str) -> Result<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"')
        .collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| EgError::invalid_value(key, text.trim()))
}

/// Coerce `raw` according to `kind`.
pub fn extract(kind: FieldKind, key: &str, raw: &str) -> Result<ParamValue> {
    match kind {
        FieldKind::Str => Ok(ParamValue::Str(unquote(raw))),
        FieldKind::Int => parse_int(key, raw).map(ParamValue::Int),
        FieldKind::StrList => Ok(ParamValue::StrList(raw.split(',').map(unquote).collect())),
        FieldKind::IntList => raw
            .split(',')
            .map(|item| parse_int(key, item))
            .collect::<Result<Vec<_>>>()
            .map(ParamValue::IntList),
    }
}
