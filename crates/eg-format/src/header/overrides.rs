//! Caller supplied parameter overrides.

use crate::types::ParamValue;

/// Diagnostics whose files embed a wrong shot number.
const SHOT_NO_OVERRIDE_DIAGS: &[&str] = &["ha2"];

/// Key/value pairs that replace file-derived header parameters.
///
/// An override wins over the file for every key it names, including keys the
/// file does not carry at all. Recognized keys are matched case-insensitively
/// (`diag` is an alias of `NAME`); anything else replaces or adds an extra
/// parameter.
///
/// ```
/// use eg_format::Overrides;
///
/// let overrides = Overrides::new().with("ShotNo", 131000i64);
/// assert_eq!(overrides.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overrides {
    entries: Vec<(String, ParamValue)>,
}

impl Overrides {
    /// Create an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides needed to read `diag` files for `shot_no`.
    ///
    /// Some diagnostics do not follow the format exactly; this returns the
    /// corrections for those and an empty set for everything else.
    #[must_use]
    pub fn for_diagnostic(diag: &str, shot_no: i64) -> Self {
        let mut overrides = Self::new();
        if SHOT_NO_OVERRIDE_DIAGS
            .iter()
            .any(|d| d.eq_ignore_ascii_case(diag))
        {
            overrides.set("ShotNo", shot_no);
        }
        overrides
    }

    /// Add an override.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an override, replacing an earlier one for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up an override by key, case-insensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no overrides are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_case_insensitively() {
        let mut overrides = Overrides::new();
        overrides.set("ShotNo", 111i64);
        overrides.set("shotno", 222i64);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("SHOTNO"), Some(&ParamValue::Int(222)));
    }

    #[test]
    fn test_for_diagnostic() {
        let ha2 = Overrides::for_diagnostic("ha2", 123456);
        assert_eq!(ha2.get("ShotNo"), Some(&ParamValue::Int(123456)));

        let other = Overrides::for_diagnostic("DivIis_tor", 123333);
        assert!(other.is_empty());
    }
}
