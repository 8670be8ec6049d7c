//! EG file writer.
//!
//! Provides functionality to write a [`Dataset`] as EG text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::codec::encode;
use crate::error::{EgError, Result};
use crate::header::header_lines;
use crate::table::format_row;
use crate::types::{Dataset, EgWriterOptions, RawHeader};

/// EG file writer.
pub struct EgWriter<W: Write> {
    writer: BufWriter<W>,
    options: EgWriterOptions,
}

impl<W: Write> EgWriter<W> {
    /// Create a new EG writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options: EgWriterOptions::default(),
        }
    }

    /// Create a new EG writer with options.
    pub fn with_options(writer: W, options: EgWriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Encode and write a dataset.
    pub fn write_dataset(self, dataset: &Dataset) -> Result<()> {
        let (header, table) = encode(dataset, &self.options.encode_options())?;
        self.write_parts(&header, &table)
    }

    /// Write an already encoded header and table.
    pub fn write_parts(mut self, header: &RawHeader, table: &Array2<f64>) -> Result<()> {
        if table.ncols() != header.num_columns() {
            return Err(EgError::shape_mismatch(format!(
                "table has {} columns, header declares {}",
                table.ncols(),
                header.num_columns()
            )));
        }

        for line in header_lines(header) {
            if line.is_empty() {
                writeln!(self.writer, "#")?;
            } else {
                writeln!(self.writer, "# {line}")?;
            }
        }
        for row in table.rows() {
            let text = format_row(row, &self.options.number_format, &self.options.delimiter);
            writeln!(self.writer, "{text}")?;
        }
        self.writer.flush()?;

        debug!(
            diag = %header.diag,
            shot_no = header.shot_no,
            rows = table.nrows(),
            format = %self.options.number_format,
            "wrote EG text"
        );
        Ok(())
    }
}

impl EgWriter<File> {
    /// Create an EG file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }

    /// Create an EG file with options.
    pub fn create_with_options(path: &Path, options: EgWriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_options(file, options))
    }
}

/// Write a dataset to an EG file.
pub fn write_eg(path: &Path, dataset: &Dataset) -> Result<()> {
    EgWriter::create(path)?.write_dataset(dataset)
}

/// Write a dataset to an EG file with options.
pub fn write_eg_with_options(path: &Path, dataset: &Dataset, options: EgWriterOptions) -> Result<()> {
    EgWriter::create_with_options(path, options)?.write_dataset(dataset)
}

/// Render a dataset as EG text.
pub fn write_eg_string(dataset: &Dataset, options: EgWriterOptions) -> Result<String> {
    let mut buffer = Vec::new();
    EgWriter::with_options(&mut buffer, options).write_dataset(dataset)?;
    String::from_utf8(buffer).map_err(|_| EgError::InvalidEncoding)
}
