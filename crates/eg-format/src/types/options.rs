//! Reader and writer options.

use chrono::NaiveDateTime;

use crate::codec::EncodeOptions;
use crate::format::NumberFormat;
use crate::header::Overrides;

/// Default field delimiter of the data table.
pub const DEFAULT_DELIMITER: &str = ", ";

/// Options for reading EG files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EgReaderOptions {
    /// Header values that take precedence over the file.
    pub overrides: Overrides,
}

impl EgReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the override set.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Reader options with the corrections known for `diag`.
    #[must_use]
    pub fn for_diagnostic(diag: &str, shot_no: i64) -> Self {
        Self::new().with_overrides(Overrides::for_diagnostic(diag, shot_no))
    }
}

/// Options for writing EG files.
#[derive(Debug, Clone, PartialEq)]
pub struct EgWriterOptions {
    /// Format of table values (default: `%.6e`).
    pub number_format: NumberFormat,
    /// Field delimiter (default: `", "`).
    pub delimiter: String,
    /// Diagnostic name, overriding the `diag` attribute.
    pub name: Option<String>,
    /// Shot number, overriding the dataset.
    pub shot_no: Option<i64>,
    /// Value written to `Date` (default: current time).
    pub date: Option<NaiveDateTime>,
}

impl Default for EgWriterOptions {
    fn default() -> Self {
        Self {
            number_format: NumberFormat::default(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            name: None,
            shot_no: None,
            date: None,
        }
    }
}

impl EgWriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number format.
    #[must_use]
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the shot number.
    #[must_use]
    pub fn with_shot_no(mut self, shot_no: i64) -> Self {
        self.shot_no = Some(shot_no);
        self
    }

    /// Set the `Date` timestamp.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Encode options carried by these writer options.
    #[must_use]
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            name: self.name.clone(),
            shot_no: self.shot_no,
            date: self.date,
        }
    }
}
