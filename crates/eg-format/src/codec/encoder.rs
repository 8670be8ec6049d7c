//! Dataset to table serialization.

use chrono::NaiveDateTime;
use ndarray::{Array2, IxDyn};
use tracing::debug;

use super::axes::{StorageLayout, flatten_column_major, grid_points};
use super::decoder::DIAG_ATTR;
use crate::error::{EgError, Result};
use crate::header::ParamKey;
use crate::types::{Attrs, Dataset, RawHeader};

/// Date format written to the `Date` parameter.
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Identification and timestamp used when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Diagnostic name; falls back to the `diag` attribute.
    pub name: Option<String>,
    /// Shot number; falls back to the `ShotNo` attribute, then the scalar coordinate.
    pub shot_no: Option<i64>,
    /// Timestamp for `Date` (default: now).
    pub date: Option<NaiveDateTime>,
}

impl EncodeOptions {
    /// Create encode options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the shot number.
    #[must_use]
    pub fn with_shot_no(mut self, shot_no: i64) -> Self {
        self.shot_no = Some(shot_no);
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    fn formatted_date(&self) -> String {
        self.date
            .unwrap_or_else(|| chrono::Local::now().naive_local())
            .format(DATE_FORMAT)
            .to_string()
    }
}

/// Serialize a dataset into a header and a row-major numeric table.
///
/// The table has one row per grid point: coordinate columns first, then one
/// column per data variable, laid out so that [`decode`](super::decode)
/// restores the dataset.
pub fn encode(dataset: &Dataset, options: &EncodeOptions) -> Result<(RawHeader, Array2<f64>)> {
    let mut attrs = dataset.attrs.clone();
    let diag = resolve_name(&mut attrs, options)?;
    let shot_no = resolve_shot_no(&mut attrs, dataset, options)?;
    attrs.remove(ParamKey::Date.canonical());

    let shape = dataset.shape();
    let num_rows = grid_points(&shape)?;
    let columns = storage_columns(dataset)?;
    let table = Array2::from_shape_fn((num_rows, columns.len()), |(r, c)| columns[c][r]);

    let header = RawHeader {
        diag,
        shot_no,
        sub_shot_no: None,
        date: options.formatted_date(),
        dim_no: dataset.dims.len(),
        dim_names: dataset.dims.clone(),
        dim_units: dataset
            .dims
            .iter()
            .map(|d| dataset.coord(d).map(|c| c.units.clone()).unwrap_or_default())
            .collect(),
        dim_sizes: shape,
        val_no: dataset.data_vars.len(),
        val_names: dataset.data_vars.iter().map(|v| v.name.clone()).collect(),
        val_units: dataset.data_vars.iter().map(|v| v.units.clone()).collect(),
        extra_params: Attrs::new(),
        comments: attrs,
    };
    debug!(
        diag = %header.diag,
        shot_no = header.shot_no,
        rows = table.nrows(),
        columns = table.ncols(),
        "encoded EG table"
    );
    Ok((header, table))
}

/// Table columns of a dataset in storage order: coordinates, then variables.
///
/// Each column has one entry per grid point.
pub fn storage_columns(dataset: &Dataset) -> Result<Vec<Vec<f64>>> {
    if dataset.dims.is_empty() {
        return Err(EgError::shape_mismatch("dataset has no dimensions"));
    }
    let shape = dataset.shape();
    let layout = StorageLayout::new(&shape);
    let storage_shape = IxDyn(&layout.storage_shape());
    let mut columns = Vec::with_capacity(dataset.dims.len() + dataset.data_vars.len());

    for (i, dim) in dataset.dims.iter().enumerate() {
        let coord = dataset.coord(dim).ok_or_else(|| {
            EgError::shape_mismatch(format!("dimension {dim} has no coordinate"))
        })?;
        // Broadcast along the storage axis that holds this dimension.
        let mut axis_shape = vec![1usize; layout.ndim()];
        axis_shape[layout.storage_axis(i)] = coord.len();
        let values = coord.values.as_standard_layout();
        let axis = values.view().into_shape_with_order(IxDyn(&axis_shape))?;
        let grid = axis.broadcast(storage_shape.clone()).ok_or_else(|| {
            EgError::shape_mismatch(format!("cannot broadcast coordinate {dim}"))
        })?;
        columns.push(flatten_column_major(&grid));
    }

    let storage = layout.storage_order().to_vec();
    for var in &dataset.data_vars {
        if var.data.shape() != shape.as_slice() {
            return Err(EgError::shape_mismatch(format!(
                "variable {} has shape {:?}, dimensions {:?} have {:?}",
                var.name,
                var.data.shape(),
                dataset.dims,
                shape
            )));
        }
        let stored = var.data.view().permuted_axes(storage.clone());
        columns.push(flatten_column_major(&stored));
    }
    Ok(columns)
}

fn resolve_name(attrs: &mut Attrs, options: &EncodeOptions) -> Result<String> {
    let from_attrs = attrs.remove(DIAG_ATTR);
    options
        .name
        .clone()
        .or(from_attrs)
        .ok_or(EgError::MissingIdentifier { field: "NAME" })
}

fn resolve_shot_no(attrs: &mut Attrs, dataset: &Dataset, options: &EncodeOptions) -> Result<i64> {
    let key = ParamKey::ShotNo.canonical();
    let from_attrs = attrs.remove(key);
    if let Some(shot_no) = options.shot_no {
        return Ok(shot_no);
    }
    if let Some(raw) = from_attrs {
        return raw
            .trim()
            .parse::<i64>()
            .map_err(|_| EgError::invalid_value(key, raw.trim()));
    }
    dataset
        .shot_no
        .ok_or(EgError::MissingIdentifier { field: "ShotNo" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::types::raw_header::sample_header;
    use crate::types::{Coordinate, DataVariable};
    use chrono::NaiveDate;
    use ndarray::{Array1, ArrayD, array};

    fn fixed_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn grid_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.push_coord(Coordinate::new("Time", Array1::from(vec![0.0, 0.1, 0.2]), "s"));
        ds.push_coord(Coordinate::new("R", Array1::from(vec![5.0, 6.0]), "m"));
        ds.push_data_var(DataVariable::new(
            "Te",
            ArrayD::from_shape_fn(IxDyn(&[3, 2]), |idx| (100 + idx[0] + 10 * idx[1]) as f64),
            "eV",
        ));
        ds.shot_no = Some(100);
        ds.attrs.insert("diag", "te");
        ds.attrs.insert("Date", "old");
        ds.attrs.insert("Operator", "'someone'");
        ds
    }

    #[test]
    fn test_encode_two_dimensions() {
        let options = EncodeOptions::new().with_date(fixed_date());
        let (header, table) = encode(&grid_dataset(), &options).unwrap();

        assert_eq!(header.diag, "te");
        assert_eq!(header.shot_no, 100);
        assert_eq!(header.date, "03/15/2024 14:30");
        assert_eq!(header.dim_names, vec!["Time", "R"]);
        assert_eq!(header.dim_sizes, vec![3, 2]);
        assert_eq!(header.dim_units, vec!["s", "m"]);
        assert_eq!(header.val_names, vec!["Te"]);
        let keys: Vec<_> = header.comments.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Operator"]);

        assert_eq!(
            table,
            array![
                [0.0, 5.0, 100.0],
                [0.0, 6.0, 110.0],
                [0.1, 5.0, 101.0],
                [0.1, 6.0, 111.0],
                [0.2, 5.0, 102.0],
                [0.2, 6.0, 112.0],
            ]
        );
    }

    #[test]
    fn test_encode_then_decode_restores_dataset() {
        let original = grid_dataset();
        let options = EncodeOptions::new().with_date(fixed_date());
        let (header, table) = encode(&original, &options).unwrap();
        let decoded = decode(header, &table).unwrap();

        assert_eq!(decoded.dims, original.dims);
        assert_eq!(decoded.coords, original.coords);
        assert_eq!(decoded.data_vars, original.data_vars);
        assert_eq!(decoded.shot_no, Some(100));
        assert_eq!(decoded.attrs.get("Operator"), Some("'someone'"));
        assert_eq!(decoded.attrs.get("Date"), Some("03/15/2024 14:30"));
    }

    #[test]
    fn test_identifier_precedence() {
        let mut ds = grid_dataset();
        ds.attrs.insert("ShotNo", "200");
        let (header, _) = encode(&ds, &EncodeOptions::new()).unwrap();
        assert_eq!(header.shot_no, 200);
        assert!(!header.comments.contains_key("ShotNo"));

        let options = EncodeOptions::new().with_name("ece").with_shot_no(300);
        let (header, _) = encode(&ds, &options).unwrap();
        assert_eq!(header.diag, "ece");
        assert_eq!(header.shot_no, 300);
        assert!(!header.comments.contains_key("diag"));
    }

    #[test]
    fn test_missing_identifiers() {
        let mut ds = grid_dataset();
        ds.attrs.remove("diag");
        let err = encode(&ds, &EncodeOptions::new()).unwrap_err();
        assert!(matches!(err, EgError::MissingIdentifier { field: "NAME" }));

        let mut ds = grid_dataset();
        ds.shot_no = None;
        let err = encode(&ds, &EncodeOptions::new()).unwrap_err();
        assert!(matches!(err, EgError::MissingIdentifier { field: "ShotNo" }));
    }

    #[test]
    fn test_variable_shape_mismatch() {
        let mut ds = grid_dataset();
        ds.data_var_mut("Te").unwrap().data = ArrayD::zeros(IxDyn(&[2, 3]));
        let err = encode(&ds, &EncodeOptions::new()).unwrap_err();
        assert!(matches!(err, EgError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_one_dimension_table() {
        let rows = array![[0.0, 10.0], [1.0, 20.0], [2.0, 30.0]];
        let ds = decode(sample_header(), &rows).unwrap();
        let (header, table) = encode(&ds, &EncodeOptions::new()).unwrap();
        assert_eq!(table, rows);
        assert_eq!(header.dim_sizes, vec![3]);
    }
}
