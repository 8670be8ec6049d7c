//! EG text format reader and writer.
//!
//! EG files carry a multi-dimensional measurement as a flat text table: a
//! `#`-prefixed header with `[Parameters]`, `[comments]` and `[data]`
//! sections, followed by one row per grid point holding the coordinate values
//! and then the measured values. This crate turns that table into a labeled
//! [`Dataset`] of coordinates and N-dimensional variables, and back.
//!
//! # Features
//!
//! - Section-aware header parser with typed coercion and required-key checks
//! - Caller supplied [`Overrides`] for files with known header defects
//! - Exact inverse decode/encode through a shared [`StorageLayout`]
//! - printf-style [`NumberFormat`] for the written table
//! - Optional Polars DataFrame integration (with `polars` feature)
//! - Optional serde support (with `serde` feature)
//!
//! # Example
//!
//! ```
//! use eg_format::{EgWriterOptions, read_eg_str, write_eg_string};
//!
//! let text = concat!(
//!     "# [Parameters]\n",
//!     "# NAME = 'te'\n",
//!     "# ShotNo = 100\n",
//!     "# Date = '01/01/2020 00:00'\n",
//!     "# DimNo = 1\n",
//!     "# DimName = 'R'\n",
//!     "# DimSize = 3\n",
//!     "# DimUnit = 'm'\n",
//!     "# ValNo = 1\n",
//!     "# ValName = 'Te'\n",
//!     "# ValUnit = 'eV'\n",
//!     "# [data]\n",
//!     "0, 10\n",
//!     "1, 20\n",
//!     "2, 30\n",
//! );
//!
//! let ds = read_eg_str(text).unwrap();
//! assert_eq!(ds.dims, vec!["R"]);
//! assert_eq!(ds.shot_no, Some(100));
//! assert_eq!(ds.data_var("Te").unwrap().units, "eV");
//!
//! let written = write_eg_string(&ds, EgWriterOptions::default()).unwrap();
//! assert!(written.starts_with("# [Parameters]\n# NAME = 'te'\n"));
//! ```
//!
//! # Overrides
//!
//! ```
//! use eg_format::{EgReaderOptions, Overrides};
//!
//! let options = EgReaderOptions::new().with_overrides(Overrides::new().with("ShotNo", 222));
//! assert_eq!(options.overrides.len(), 1);
//! ```

pub mod codec;
mod error;
mod format;
pub mod header;
mod reader;
mod table;
mod types;
mod writer;

#[cfg(feature = "polars")]
mod polars_ext;

// Re-export error types
pub use error::{EgError, Result};

// Re-export core types
pub use types::{
    Attrs, Coordinate, DEFAULT_DELIMITER, DataVariable, Dataset, EgReaderOptions,
    EgWriterOptions, ParamValue, RawHeader,
};

pub use codec::{EncodeOptions, StorageLayout, decode, encode};
pub use format::{Conversion, NumberFormat};
pub use header::{Overrides, ParamKey, parse_header};
pub use table::{format_row, parse_rows};

// Re-export reader functionality
pub use reader::{EgReader, read_eg, read_eg_str, read_eg_with_options};

// Re-export writer functionality
pub use writer::{EgWriter, write_eg, write_eg_string, write_eg_with_options};

// Re-export Polars integration
#[cfg(feature = "polars")]
pub use polars_ext::dataset_to_dataframe;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
