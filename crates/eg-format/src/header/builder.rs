//! Accumulates header entries and validates them once scanning is done.

use std::collections::BTreeMap;

use tracing::debug;

use super::keys::ParamKey;
use super::overrides::Overrides;
use crate::error::{EgError, Result};
use crate::types::{Attrs, ParamValue, RawHeader};

/// Key under which free comment text accumulates.
pub const COMMENT_KEY: &str = "comment";

/// Mutable header state filled by the parser.
#[derive(Debug, Default)]
pub struct HeaderBuilder {
    params: BTreeMap<ParamKey, ParamValue>,
    extra_params: Attrs,
    comments: Attrs,
}

impl HeaderBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a typed parameter, replacing an earlier value.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) {
        self.params.insert(key, value);
    }

    /// Whether a recognized parameter has been set.
    #[must_use]
    pub fn is_set(&self, key: ParamKey) -> bool {
        self.params.contains_key(&key)
    }

    /// Store an unrecognized parameter verbatim.
    pub fn set_extra(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.extra_params.insert(key, raw);
    }

    /// Store a keyed comment verbatim.
    pub fn set_comment(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.comments.insert(key, raw);
    }

    /// Append free text to the `comment` accumulator.
    pub fn append_comment(&mut self, text: &str) {
        self.comments.append(COMMENT_KEY, text);
    }

    /// Apply overrides, check required keys and build the typed header.
    pub fn finalize(mut self, overrides: &Overrides) -> Result<RawHeader> {
        for (name, value) in overrides.iter() {
            match ParamKey::lookup(name) {
                Some(key) => {
                    let value = key.coerce(value)?;
                    self.params.insert(key, value);
                }
                None => {
                    self.extra_params.insert(name.trim(), value.to_string());
                }
            }
        }

        if let Some(missing) = ParamKey::REQUIRED
            .into_iter()
            .find(|key| !self.params.contains_key(key))
        {
            return Err(EgError::MissingRequiredField {
                key: missing.canonical(),
            });
        }

        let header = RawHeader {
            diag: self.take_str(ParamKey::Name)?,
            shot_no: self.take_int(ParamKey::ShotNo)?,
            sub_shot_no: self.take_optional_int(ParamKey::SubShotNo)?,
            date: self.take_str(ParamKey::Date)?,
            dim_no: self.take_count(ParamKey::DimNo)?,
            dim_names: self.take_str_list(ParamKey::DimName)?,
            dim_units: self.take_str_list(ParamKey::DimUnit)?,
            dim_sizes: self.take_sizes(ParamKey::DimSize)?,
            val_no: self.take_count(ParamKey::ValNo)?,
            val_names: self.take_str_list(ParamKey::ValName)?,
            val_units: self.take_str_list(ParamKey::ValUnit)?,
            extra_params: self.extra_params,
            comments: self.comments,
        };
        debug!(
            diag = %header.diag,
            shot_no = header.shot_no,
            dim_no = header.dim_no,
            val_no = header.val_no,
            "parsed EG header"
        );
        Ok(header)
    }

    fn take(&mut self, key: ParamKey) -> Result<ParamValue> {
        self.params.remove(&key).ok_or(EgError::MissingRequiredField {
            key: key.canonical(),
        })
    }

    fn take_str(&mut self, key: ParamKey) -> Result<String> {
        match self.take(key)? {
            ParamValue::Str(s) => Ok(s),
            other => Err(EgError::invalid_value(key.canonical(), other.to_string())),
        }
    }

    fn take_int(&mut self, key: ParamKey) -> Result<i64> {
        match self.take(key)? {
            ParamValue::Int(n) => Ok(n),
            other => Err(EgError::invalid_value(key.canonical(), other.to_string())),
        }
    }

    fn take_optional_int(&mut self, key: ParamKey) -> Result<Option<i64>> {
        if self.is_set(key) {
            self.take_int(key).map(Some)
        } else {
            Ok(None)
        }
    }

    fn take_count(&mut self, key: ParamKey) -> Result<usize> {
        let n = self.take_int(key)?;
        usize::try_from(n).map_err(|_| EgError::invalid_value(key.canonical(), n.to_string()))
    }

    fn take_str_list(&mut self, key: ParamKey) -> Result<Vec<String>> {
        match self.take(key)? {
            ParamValue::StrList(items) => Ok(items),
            other => Err(EgError::invalid_value(key.canonical(), other.to_string())),
        }
    }

    fn take_sizes(&mut self, key: ParamKey) -> Result<Vec<usize>> {
        match self.take(key)? {
            ParamValue::IntList(items) => items
                .into_iter()
                .map(|n| {
                    usize::try_from(n)
                        .map_err(|_| EgError::invalid_value(key.canonical(), n.to_string()))
                })
                .collect(),
            other => Err(EgError::invalid_value(key.canonical(), other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> HeaderBuilder {
        let mut builder = HeaderBuilder::new();
        builder.set(ParamKey::Name, ParamValue::from("te"));
        builder.set(ParamKey::ShotNo, ParamValue::Int(111));
        builder.set(ParamKey::Date, ParamValue::from("01/01/2020 00:00"));
        builder.set(ParamKey::DimNo, ParamValue::Int(1));
        builder.set(ParamKey::DimName, ParamValue::from(vec!["R"]));
        builder.set(ParamKey::DimSize, ParamValue::IntList(vec![3]));
        builder.set(ParamKey::DimUnit, ParamValue::from(vec!["m"]));
        builder.set(ParamKey::ValNo, ParamValue::Int(1));
        builder.set(ParamKey::ValName, ParamValue::from(vec!["Te"]));
        builder.set(ParamKey::ValUnit, ParamValue::from(vec!["eV"]));
        builder
    }

    #[test]
    fn test_finalize_complete() {
        let mut builder = complete_builder();
        builder.set_extra("Gain", "'2.5'");
        builder.append_comment("line1");
        builder.append_comment("line2");

        let header = builder.finalize(&Overrides::new()).unwrap();
        assert_eq!(header.diag, "te");
        assert_eq!(header.shot_no, 111);
        assert_eq!(header.sub_shot_no, None);
        assert_eq!(header.dim_sizes, vec![3]);
        assert_eq!(header.extra_params.get("Gain"), Some("'2.5'"));
        assert_eq!(header.comments.get(COMMENT_KEY), Some("line1line2"));
    }

    #[test]
    fn test_finalize_reports_each_missing_key() {
        for key in ParamKey::REQUIRED {
            let mut builder = complete_builder();
            builder.params.remove(&key);
            let err = builder.finalize(&Overrides::new()).unwrap_err();
            assert!(
                matches!(err, EgError::MissingRequiredField { key: k } if k == key.canonical()),
                "expected missing {key:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_override_precedence() {
        let overrides = Overrides::new().with("ShotNo", 222i64);
        let header = complete_builder().finalize(&overrides).unwrap();
        assert_eq!(header.shot_no, 222);
    }

    #[test]
    fn test_override_supplies_absent_key() {
        let mut builder = complete_builder();
        builder.params.remove(&ParamKey::ShotNo);
        let overrides = Overrides::new().with("shotno", "131000");
        let header = builder.finalize(&overrides).unwrap();
        assert_eq!(header.shot_no, 131000);
    }

    #[test]
    fn test_unrecognized_override_becomes_extra() {
        let overrides = Overrides::new().with("Gain", 3i64);
        let header = complete_builder().finalize(&overrides).unwrap();
        assert_eq!(header.extra_params.get("Gain"), Some("3"));
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut builder = complete_builder();
        builder.set(ParamKey::DimSize, ParamValue::IntList(vec![-3]));
        let err = builder.finalize(&Overrides::new()).unwrap_err();
        assert!(matches!(err, EgError::InvalidValue { .. }));
    }
}
