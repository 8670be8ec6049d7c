//! Typed header parameter values.

use std::fmt;

/// A typed value of a header parameter.
///
/// Callers use these to override file-derived parameters, see
/// [`Overrides`](crate::Overrides).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Single string.
    Str(String),
    /// Integer.
    Int(i64),
    /// Comma separated list of strings.
    StrList(Vec<String>),
    /// Comma separated list of integers.
    IntList(Vec<i64>),
}

impl fmt::Display for ParamValue {
    /// Render the value the way it appears after `=` in an EG header, minus quoting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::StrList(items) => f.write_str(&items.join(",")),
            Self::IntList(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl TryFrom<usize> for ParamValue {
    type Error = std::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value).map(Self::Int)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        Self::StrList(value.into_iter().map(String::from).collect())
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntList(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::from("te").to_string(), "te");
        assert_eq!(ParamValue::from(42i64).to_string(), "42");
        assert_eq!(ParamValue::from(vec!["R", "Z"]).to_string(), "R,Z");
        assert_eq!(ParamValue::from(vec![3i64, 4]).to_string(), "3,4");
    }

    #[test]
    fn test_try_from_usize() {
        assert_eq!(ParamValue::try_from(3usize), Ok(ParamValue::Int(3)));
        #[cfg(target_pointer_width = "64")]
        assert!(ParamValue::try_from(usize::MAX).is_err());
    }
}
