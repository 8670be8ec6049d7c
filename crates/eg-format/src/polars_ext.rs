//! Polars DataFrame integration.

use polars::prelude::{Column, DataFrame};

use crate::codec::storage_columns;
use crate::error::Result;
use crate::types::Dataset;

/// Flatten a dataset into a tidy DataFrame.
///
/// One row per grid point, in EG table order: a column per dimension holding
/// its coordinate value, then a column per data variable.
pub fn dataset_to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    let names = dataset
        .dims
        .iter()
        .chain(dataset.data_vars.iter().map(|v| &v.name));
    let columns: Vec<Column> = names
        .zip(storage_columns(dataset)?)
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();
    Ok(DataFrame::new(columns)?)
}
