//! Parsed header of an EG file.

use super::Attrs;
use crate::codec::grid_points;
use crate::error::{EgError, Result};

/// Typed representation of the `[Parameters]` and `[comments]` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawHeader {
    /// Diagnostic name (`NAME`).
    pub diag: String,
    /// Shot number (`ShotNo`).
    pub shot_no: i64,
    /// Sub-shot number (`SubShotNo`), if the file carries one.
    pub sub_shot_no: Option<i64>,
    /// Acquisition date string (`Date`), kept as written.
    pub date: String,
    /// Number of dimensions (`DimNo`).
    pub dim_no: usize,
    /// Dimension names (`DimName`).
    pub dim_names: Vec<String>,
    /// Dimension units (`DimUnit`).
    pub dim_units: Vec<String>,
    /// Dimension sizes (`DimSize`).
    pub dim_sizes: Vec<usize>,
    /// Number of value columns (`ValNo`).
    pub val_no: usize,
    /// Value names (`ValName`).
    pub val_names: Vec<String>,
    /// Value units (`ValUnit`).
    pub val_units: Vec<String>,
    /// Unrecognized `[Parameters]` entries, verbatim.
    pub extra_params: Attrs,
    /// `[comments]` entries; free text accumulates under `"comment"`.
    pub comments: Attrs,
}

impl RawHeader {
    /// Total column count of the data table.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.dim_no + self.val_no
    }

    /// Number of grid points implied by `dim_sizes`.
    pub fn num_points(&self) -> Result<usize> {
        grid_points(&self.dim_sizes)
    }

    /// Check that every descriptor list agrees with its declared count.
    pub fn validate_descriptors(&self) -> Result<()> {
        if self.dim_no == 0 {
            return Err(EgError::shape_mismatch("DimNo must be at least 1"));
        }
        let checks = [
            ("DimName", self.dim_names.len(), self.dim_no, "DimNo"),
            ("DimUnit", self.dim_units.len(), self.dim_no, "DimNo"),
            ("DimSize", self.dim_sizes.len(), self.dim_no, "DimNo"),
            ("ValName", self.val_names.len(), self.val_no, "ValNo"),
            ("ValUnit", self.val_units.len(), self.val_no, "ValNo"),
        ];
        for (field, actual, expected, count) in checks {
            if actual != expected {
                return Err(EgError::shape_mismatch(format!(
                    "{field} has {actual} entries but {count} = {expected}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_header() -> RawHeader {
    RawHeader {
        diag: "te".to_string(),
        shot_no: 100,
        sub_shot_no: None,
        date: "01/01/2020 00:00".to_string(),
        dim_no: 1,
        dim_names: vec!["R".to_string()],
        dim_units: vec!["m".to_string()],
        dim_sizes: vec![3],
        val_no: 1,
        val_names: vec!["Te".to_string()],
        val_units: vec!["eV".to_string()],
        extra_params: Attrs::new(),
        comments: Attrs::new(),
    }
}
