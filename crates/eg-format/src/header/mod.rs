//! EG header parsing and rendering.
//!
//! - [`keys`]: recognized parameter keys and their coercions
//! - [`builder`]: accumulation and required-key validation
//! - [`parser`]: section-aware line scanner
//! - [`overrides`]: caller supplied replacements for file values
//! - [`render`]: header text generation

pub mod builder;
pub mod keys;
pub mod overrides;
pub mod parser;
pub mod render;

pub use builder::{COMMENT_KEY, HeaderBuilder};
pub use keys::{FieldKind, ParamKey};
pub use overrides::Overrides;
pub use parser::{Control, HeaderParser, HeaderScan, Section, parse_header};
pub use render::header_lines;
