//! CLI library components for the EG tool.

pub mod logging;
pub mod summary;
