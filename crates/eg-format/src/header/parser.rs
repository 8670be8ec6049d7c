//! Line classifier for the EG header.
//!
//! The header is a run of `#`-prefixed lines split into sections by
//! `[Parameters]`, `[comments]` and `[data]` markers. Scanning stops at
//! `[data]` or at the first line without a `#`.

use tracing::{debug, trace, warn};

use super::builder::HeaderBuilder;
use super::keys::ParamKey;
use super::overrides::Overrides;
use crate::error::{EgError, Result};
use crate::types::RawHeader;

/// Header section the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before any section marker.
    #[default]
    None,
    /// `[Parameters]` block.
    Parameters,
    /// `[comments]` block.
    Comments,
}

/// What the caller should do after feeding a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The line belonged to the header; keep feeding.
    Continue,
    /// The `[data]` marker was consumed; the table starts on the next line.
    DataMarker,
    /// The line is not a header line; the table starts on this line.
    EndOfHeader,
}

/// Result of scanning a whole header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderScan {
    /// The typed header.
    pub header: RawHeader,
    /// Index of the first line of the numeric table.
    pub data_start: usize,
}

/// Incremental header parser.
#[derive(Debug)]
pub struct HeaderParser<'a> {
    section: Section,
    builder: HeaderBuilder,
    overrides: &'a Overrides,
    line_no: usize,
}

impl<'a> HeaderParser<'a> {
    /// Create a parser that defers to `overrides` for the keys they name.
    #[must_use]
    pub fn new(overrides: &'a Overrides) -> Self {
        Self {
            section: Section::None,
            builder: HeaderBuilder::new(),
            overrides,
            line_no: 0,
        }
    }

    /// Current section.
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Classify one line and record its content.
    pub fn feed(&mut self, line: &str) -> Result<Control> {
        self.line_no += 1;
        let lower = line.to_ascii_lowercase();

        if lower.contains("[parameters]") {
            debug!(line = self.line_no, "entering [Parameters]");
            self.section = Section::Parameters;
            return Ok(Control::Continue);
        }
        if lower.contains("[comments]") {
            debug!(line = self.line_no, "entering [comments]");
            self.section = Section::Comments;
            return Ok(Control::Continue);
        }
        if lower.contains("[data]") {
            debug!(line = self.line_no, "reached [data]");
            return Ok(Control::DataMarker);
        }
        let Some(hash) = line.find('#') else {
            debug!(line = self.line_no, "header ended without [data] marker");
            return Ok(Control::EndOfHeader);
        };

        let body = &line[hash + 1..];
        if body.trim().is_empty() {
            return Ok(Control::Continue);
        }

        trace!(line = self.line_no, section = ?self.section, "header line");
        match self.section {
            Section::None => {}
            Section::Parameters => self.parameter_line(line, body)?,
            Section::Comments => self.comment_line(body),
        }
        Ok(Control::Continue)
    }

    /// Stop scanning and validate the collected header.
    pub fn finish(self) -> Result<RawHeader> {
        self.builder.finalize(self.overrides)
    }

    fn parameter_line(&mut self, line: &str, body: &str) -> Result<()> {
        let Some((key, raw)) = body.split_once('=') else {
            return Err(EgError::malformed_line(
                self.line_no,
                line,
                "expected `key = value`",
            ));
        };
        let key = key.trim();
        if key.is_empty() {
            warn!(line = self.line_no, "skipping parameter without a key");
            return Ok(());
        }

        match ParamKey::lookup(key) {
            // Override wins; the file value is not even coerced.
            Some(param) if self.overrides.get(param.canonical()).is_some() => {}
            Some(ParamKey::Name) if self.overrides.get("diag").is_some() => {}
            Some(param) => {
                let value = param.extract(raw)?;
                self.builder.set(param, value);
            }
            None => self.builder.set_extra(key, raw.trim()),
        }
        Ok(())
    }

    fn comment_line(&mut self, body: &str) {
        match body.split_once('=') {
            Some((key, raw)) => {
                let key = key.trim();
                if key.is_empty() {
                    warn!(line = self.line_no, "skipping comment without a key");
                } else {
                    self.builder.set_comment(key, raw.trim());
                }
            }
            None => {
                let text: String = body
                    .trim()
                    .chars()
                    .filter(|c| *c != ' ' && *c != '\'' && *c != '"')
                    .collect();
                self.builder.append_comment(&text);
            }
        }
    }
}

/// Scan header lines and build the typed header.
///
/// Consumes lines until the `[data]` marker or the first line without `#`.
/// The returned [`HeaderScan::data_start`] indexes the first table line.
pub fn parse_header<'l, I>(lines: I, overrides: &Overrides) -> Result<HeaderScan>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut parser = HeaderParser::new(overrides);
    let mut data_start = 0usize;
    for (idx, line) in lines.into_iter().enumerate() {
        match parser.feed(line)? {
            Control::Continue => data_start = idx + 1,
            Control::DataMarker => {
                data_start = idx + 1;
                break;
            }
            Control::EndOfHeader => {
                data_start = idx;
                break;
            }
        }
    }
    let header = parser.finish()?;
    Ok(HeaderScan { header, data_start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::builder::COMMENT_KEY;

    const HEADER: &str = "\
# [Parameters]
# NAME = 'te'
# ShotNo = 111
# SubShotNo = 1
# Date = '01/01/2020 00:00'
# DimNo = 1
# DimName = 'R'
# DimSize = 3
# DimUnit = 'm'
# ValNo = 1
# ValName = 'Te'
# ValUnit = 'eV'
# Gain = '2.5'
#
# [Comments]
# Operator = 'someone'
# first free 'text'
# second line
#
# [data]
0, 10
1, 20
2, 30";

    #[test]
    fn test_parse_full_header() {
        let scan = parse_header(HEADER.lines(), &Overrides::new()).unwrap();
        let header = scan.header;
        assert_eq!(header.diag, "te");
        assert_eq!(header.shot_no, 111);
        assert_eq!(header.sub_shot_no, Some(1));
        assert_eq!(header.date, "01/01/2020 00:00");
        assert_eq!(header.dim_names, vec!["R"]);
        assert_eq!(header.dim_sizes, vec![3]);
        assert_eq!(header.val_units, vec!["eV"]);
        assert_eq!(header.extra_params.get("Gain"), Some("'2.5'"));
        assert_eq!(header.comments.get("Operator"), Some("'someone'"));
        assert_eq!(header.comments.get(COMMENT_KEY), Some("firstfreetextsecondline"));
        assert_eq!(scan.data_start, 20);
    }

    #[test]
    fn test_header_ends_at_first_bare_line() {
        let text = HEADER.replace("# [data]\n", "");
        let scan = parse_header(text.lines(), &Overrides::new()).unwrap();
        let first_data = text.lines().nth(scan.data_start).unwrap();
        assert_eq!(first_data, "0, 10");
    }

    #[test]
    fn test_override_skips_file_value() {
        let text = HEADER.replace("ShotNo = 111", "ShotNo = not-a-number");
        let err = parse_header(text.lines(), &Overrides::new()).unwrap_err();
        assert!(matches!(err, EgError::InvalidValue { .. }));

        let overrides = Overrides::new().with("ShotNo", 222i64);
        let scan = parse_header(text.lines(), &overrides).unwrap();
        assert_eq!(scan.header.shot_no, 222);
    }

    #[test]
    fn test_diag_override_replaces_name() {
        let overrides = Overrides::new().with("diag", "ece");
        let scan = parse_header(HEADER.lines(), &overrides).unwrap();
        assert_eq!(scan.header.diag, "ece");
        assert!(scan.header.extra_params.get("diag").is_none());
    }

    #[test]
    fn test_malformed_parameter_line() {
        let text = HEADER.replace("# DimNo = 1", "# DimNo 1");
        let err = parse_header(text.lines(), &Overrides::new()).unwrap_err();
        match err {
            EgError::MalformedLine { line, text, .. } => {
                assert_eq!(line, 6);
                assert_eq!(text, "# DimNo 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let text = HEADER.replace("# DimUnit = 'm'\n", "");
        let err = parse_header(text.lines(), &Overrides::new()).unwrap_err();
        assert!(matches!(err, EgError::MissingRequiredField { key: "DimUnit" }));
    }

    #[test]
    fn test_section_markers_are_case_insensitive() {
        let overrides = Overrides::default();
        let mut parser = HeaderParser::new(&overrides);
        assert_eq!(parser.feed("# [PARAMETERS]").unwrap(), Control::Continue);
        assert_eq!(parser.section(), Section::Parameters);
        assert_eq!(parser.feed("#[comments]").unwrap(), Control::Continue);
        assert_eq!(parser.section(), Section::Comments);
        assert_eq!(parser.feed("# [Data]").unwrap(), Control::DataMarker);
    }

    #[test]
    fn test_preamble_lines_ignored() {
        let text = format!("# produced by the archive\n{HEADER}");
        let scan = parse_header(text.lines(), &Overrides::new()).unwrap();
        assert_eq!(scan.header.diag, "te");
        assert_eq!(scan.data_start, 21);
    }
}
