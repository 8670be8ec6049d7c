//! Numeric body of an EG file.

use ndarray::{Array2, ArrayView1};
use tracing::trace;

use crate::error::{EgError, Result};
use crate::format::NumberFormat;

/// Parse delimited table rows into a `(rows, ncols)` matrix.
///
/// `first_line_no` is the 1-based file line of the first entry of `lines`,
/// used in error messages. Text after `#` is dropped, blank lines are
/// skipped and fields beyond `ncols` are ignored.
pub fn parse_rows<'l, I>(lines: I, first_line_no: usize, ncols: usize) -> Result<Array2<f64>>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut values = Vec::new();
    let mut num_rows = 0usize;
    for (offset, line) in lines.into_iter().enumerate() {
        let line_no = first_line_no + offset;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        let before = values.len();
        for field in content.split(',').map(str::trim).take(ncols) {
            let value = field
                .parse::<f64>()
                .map_err(|_| EgError::invalid_number(line_no, field))?;
            values.push(value);
        }
        let found = values.len() - before;
        if found < ncols {
            return Err(EgError::shape_mismatch(format!(
                "line {line_no} has {found} fields, expected {ncols}"
            )));
        }
        num_rows += 1;
    }
    trace!(rows = num_rows, columns = ncols, "parsed data table");
    Ok(Array2::from_shape_vec((num_rows, ncols), values)?)
}

/// Render one table row.
#[must_use]
pub fn format_row(row: ArrayView1<'_, f64>, format: &NumberFormat, delimiter: &str) -> String {
    row.iter()
        .map(|&v| format.format(v))
        .collect::<Vec<_>>()
        .join(delimiter)
}
