//! Core data types.

mod attrs;
mod dataset;
mod options;
pub(crate) mod raw_header;
mod value;

pub use attrs::Attrs;
pub use dataset::{Coordinate, DataVariable, Dataset};
pub use options::{DEFAULT_DELIMITER, EgReaderOptions, EgWriterOptions};
pub use raw_header::RawHeader;
pub use value::ParamValue;
