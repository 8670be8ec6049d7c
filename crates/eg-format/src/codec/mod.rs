//! Conversion between the flat EG table and the labeled dataset.

pub mod axes;
mod decoder;
mod encoder;

pub use axes::{StorageLayout, grid_points, permute_for_restore, permute_for_storage};
pub use decoder::{DIAG_ATTR, decode, reconcile_shape, replace_illegal_characters};
pub use encoder::{DATE_FORMAT, EncodeOptions, encode, storage_columns};
