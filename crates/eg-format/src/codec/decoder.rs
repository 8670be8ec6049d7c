//! Table to dataset reconstruction.

use ndarray::{Array1, Array2, Axis, Ix1};
use tracing::{debug, warn};

use super::axes::StorageLayout;
use crate::error::{EgError, Result};
use crate::header::ParamKey;
use crate::types::{Attrs, Coordinate, DataVariable, Dataset, RawHeader};

/// Characters that cannot appear in variable names, with their replacements.
const ILLEGAL_CHARS: &[(&str, &str)] = &[("/", "_over_")];

/// Header keys described by the dataset structure itself.
const RESERVED_ATTRS: &[&str] = &[
    "DimName", "DimNo", "ValName", "ValNo", "DimSize", "DimUnit", "ValUnit", "ShotNo",
];

/// Attribute key carrying the diagnostic name.
pub const DIAG_ATTR: &str = "diag";

/// Replace characters that are not allowed in variable names.
#[must_use]
pub fn replace_illegal_characters(name: &str) -> String {
    ILLEGAL_CHARS
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Trust the observed row count over a 1-D header's declared size.
///
/// Returns true when `dim_sizes[0]` was rewritten.
pub fn reconcile_shape(header: &mut RawHeader, num_rows: usize) -> bool {
    if header.dim_no == 1 && header.dim_sizes.len() == 1 && header.dim_sizes[0] != num_rows {
        warn!(
            diag = %header.diag,
            declared = header.dim_sizes[0],
            observed = num_rows,
            "DimSize disagrees with row count, using row count"
        );
        header.dim_sizes[0] = num_rows;
        return true;
    }
    false
}

/// Build a dataset from a parsed header and its numeric table.
///
/// `rows` has one row per grid point. Columns hold the `dim_no` coordinate
/// columns followed by the `val_no` variable columns; extra trailing columns
/// are ignored.
pub fn decode(mut header: RawHeader, rows: &Array2<f64>) -> Result<Dataset> {
    header.validate_descriptors()?;
    let needed = header.num_columns();
    if rows.ncols() < needed {
        return Err(EgError::shape_mismatch(format!(
            "table has {} columns, DimNo + ValNo = {needed}",
            rows.ncols()
        )));
    }
    reconcile_shape(&mut header, rows.nrows());
    let points = header.num_points()?;
    if rows.nrows() != points {
        return Err(EgError::shape_mismatch(format!(
            "table has {} rows, DimSize {:?} needs {points}",
            rows.nrows(),
            header.dim_sizes,
        )));
    }
    if header.dim_no > 1 && header.dim_sizes.contains(&0) {
        return Err(EgError::shape_mismatch(format!(
            "cannot recover coordinates with an empty dimension: DimSize {:?}",
            header.dim_sizes
        )));
    }

    let layout = StorageLayout::new(&header.dim_sizes);
    let column = |idx: usize| rows.column(idx).to_vec();

    let mut dataset = Dataset::new();
    for (i, name) in header.dim_names.iter().enumerate() {
        let values = decode_coordinate(&layout, i, column(i))?;
        dataset.push_coord(Coordinate::new(
            name.clone(),
            values,
            header.dim_units[i].clone(),
        ));
    }
    dataset.shot_no = Some(header.shot_no);

    let restore = layout.restore_order().to_vec();
    for (j, (name, units)) in header
        .val_names
        .iter()
        .zip(header.val_units.iter())
        .enumerate()
    {
        let cube = layout.reshape_column(column(header.dim_no + j))?;
        let data = cube.permuted_axes(restore.clone()).as_standard_layout().into_owned();
        dataset.push_data_var(DataVariable::new(
            replace_illegal_characters(name),
            data,
            units.clone(),
        ));
    }

    dataset.attrs = collect_attrs(&header);
    debug!(
        diag = %header.diag,
        shot_no = header.shot_no,
        shape = ?header.dim_sizes,
        variables = header.val_no,
        "decoded EG table"
    );
    Ok(dataset)
}

/// Recover the 1-D coordinate of dimension `dim` from its table column.
fn decode_coordinate(layout: &StorageLayout, dim: usize, column: Vec<f64>) -> Result<Array1<f64>> {
    let mut cube = layout.reshape_column(column)?;
    cube.swap_axes(0, layout.storage_axis(dim));
    // Fix every axis but the first at index 0.
    while cube.ndim() > 1 {
        cube = cube.index_axis_move(Axis(1), 0);
    }
    let values = cube.into_dimensionality::<Ix1>()?;
    Ok(values.as_standard_layout().into_owned())
}

/// Dataset attributes: identifying parameters, extras, then comments.
fn collect_attrs(header: &RawHeader) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert(DIAG_ATTR, header.diag.as_str());
    attrs.insert(ParamKey::Date.canonical(), header.date.as_str());
    if let Some(sub) = header.sub_shot_no {
        attrs.insert(ParamKey::SubShotNo.canonical(), sub.to_string());
    }
    for (key, value) in header.extra_params.iter().chain(header.comments.iter()) {
        if !RESERVED_ATTRS.contains(&key) {
            attrs.insert(key, value);
        }
    }
    attrs
}
