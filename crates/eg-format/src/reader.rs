//! EG file reader.
//!
//! Provides functionality to read EG text files into a [`Dataset`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::codec::decode;
use crate::error::{EgError, Result};
use crate::header::parse_header;
use crate::table::parse_rows;
use crate::types::{Dataset, EgReaderOptions, RawHeader};

/// EG file reader.
///
/// Reads the whole stream into memory, then parses the header and table.
pub struct EgReader<R: Read> {
    reader: BufReader<R>,
    options: EgReaderOptions,
}

impl<R: Read> EgReader<R> {
    /// Create a new EG reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            options: EgReaderOptions::default(),
        }
    }

    /// Create a new EG reader with options.
    pub fn with_options(reader: R, options: EgReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read and decode the file.
    pub fn read_dataset(self) -> Result<Dataset> {
        let (header, table) = self.read_parts()?;
        decode(header, &table)
    }

    /// Read the header and numeric table without decoding them.
    pub fn read_parts(mut self) -> Result<(RawHeader, Array2<f64>)> {
        let text = self.read_text()?;
        parse_text(&text, &self.options)
    }

    fn read_text(&mut self) -> Result<String> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        String::from_utf8(data).map_err(|_| EgError::InvalidEncoding)
    }
}

impl EgReader<File> {
    /// Open an EG file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, EgReaderOptions::default())
    }

    /// Open an EG file with options.
    pub fn open_with_options(path: &Path, options: EgReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EgError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                EgError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an EG file from a path.
pub fn read_eg(path: &Path) -> Result<Dataset> {
    EgReader::open(path)?.read_dataset()
}

/// Read an EG file with options.
pub fn read_eg_with_options(path: &Path, options: EgReaderOptions) -> Result<Dataset> {
    EgReader::open_with_options(path, options)?.read_dataset()
}

/// Decode EG text already held in memory.
pub fn read_eg_str(text: &str) -> Result<Dataset> {
    let (header, table) = parse_text(text, &EgReaderOptions::default())?;
    decode(header, &table)
}

/// Split EG text into its header and table.
fn parse_text(text: &str, options: &EgReaderOptions) -> Result<(RawHeader, Array2<f64>)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();
    let scan = parse_header(lines.iter().copied(), &options.overrides)?;
    let body = lines.get(scan.data_start..).unwrap_or_default();
    let table = parse_rows(
        body.iter().copied(),
        scan.data_start + 1,
        scan.header.num_columns(),
    )?;
    debug!(
        diag = %scan.header.diag,
        header_lines = scan.data_start,
        rows = table.nrows(),
        "read EG text"
    );
    Ok((scan.header, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Overrides;
    use ndarray::Array1;

    const SAMPLE: &str = "\
# [Parameters]
# NAME = 'te'
# ShotNo = 100
# Date = '01/01/2020 00:00'
# DimNo = 1
# DimName = 'R'
# DimSize = 3
# DimUnit = 'm'
# ValNo = 1
# ValName = 'Te'
# ValUnit = 'eV'
#
# [comments]
# operator = 'lab'
#
# [data]
0.000000e+00, 1.000000e+01
1.000000e+00, 2.000000e+01
2.000000e+00, 3.000000e+01
";

    #[test]
    fn test_read_from_memory() {
        let ds = EgReader::new(SAMPLE.as_bytes()).read_dataset().unwrap();
        assert_eq!(ds.dims, vec!["R"]);
        assert_eq!(ds.coord("R").unwrap().values, Array1::from(vec![0.0, 1.0, 2.0]));
        assert_eq!(ds.shot_no, Some(100));
        assert_eq!(ds.attrs.get("operator"), Some("'lab'"));
    }

    #[test]
    fn test_read_parts() {
        let (header, table) = EgReader::new(SAMPLE.as_bytes()).read_parts().unwrap();
        assert_eq!(header.diag, "te");
        assert_eq!(header.dim_sizes, vec![3]);
        assert_eq!(table.shape(), &[3, 2]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{SAMPLE}");
        let ds = read_eg_str(&text).unwrap();
        assert_eq!(ds.data_var("Te").unwrap().data.len(), 3);
    }

    #[test]
    fn test_overrides_apply() {
        let options = EgReaderOptions::new().with_overrides(Overrides::new().with("ShotNo", 7));
        let ds = EgReader::with_options(SAMPLE.as_bytes(), options)
            .read_dataset()
            .unwrap();
        assert_eq!(ds.shot_no, Some(7));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &[u8] = &[b'#', b' ', 0xff, 0xfe, b'\n'];
        let err = EgReader::new(bytes).read_dataset().unwrap_err();
        assert!(matches!(err, EgError::InvalidEncoding));
    }

    #[test]
    fn test_invalid_number_line() {
        let text = SAMPLE.replace("2.000000e+01", "oops");
        let err = read_eg_str(&text).unwrap_err();
        assert!(matches!(err, EgError::InvalidNumber { line: 18, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_eg(Path::new("/nonexistent/te@100.dat")).unwrap_err();
        assert!(matches!(err, EgError::FileNotFound { .. }));
    }
}
