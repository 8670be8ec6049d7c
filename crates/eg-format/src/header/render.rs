//! Text rendering of a [`RawHeader`].

use super::keys::ParamKey;
use crate::types::RawHeader;

/// Quote a string the way EG headers expect.
fn quote(value: &str) -> String {
    format!("'{value}'")
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote(v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_sizes(values: &[usize]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header lines without the leading `# `.
///
/// Parameters come in a fixed order, then any extra parameters, then the
/// `[comments]` block and the `[data]` marker.
#[must_use]
pub fn header_lines(header: &RawHeader) -> Vec<String> {
    let entry = |key: ParamKey, value: String| format!("{} = {}", key.canonical(), value);

    let mut lines = vec!["[Parameters]".to_string()];
    lines.push(entry(ParamKey::Name, quote(&header.diag)));
    lines.push(entry(ParamKey::ShotNo, header.shot_no.to_string()));
    if let Some(sub) = header.sub_shot_no {
        lines.push(entry(ParamKey::SubShotNo, sub.to_string()));
    }
    lines.push(entry(ParamKey::Date, quote(&header.date)));
    lines.push(entry(ParamKey::DimNo, header.dim_no.to_string()));
    lines.push(entry(ParamKey::DimName, quote_list(&header.dim_names)));
    lines.push(entry(ParamKey::DimSize, join_sizes(&header.dim_sizes)));
    lines.push(entry(ParamKey::DimUnit, quote_list(&header.dim_units)));
    lines.push(entry(ParamKey::ValNo, header.val_no.to_string()));
    lines.push(entry(ParamKey::ValName, quote_list(&header.val_names)));
    lines.push(entry(ParamKey::ValUnit, quote_list(&header.val_units)));
    for (key, value) in header.extra_params.iter() {
        lines.push(format!("{key} = {value}"));
    }

    lines.push(String::new());
    lines.push("[comments]".to_string());
    for (key, value) in header.comments.iter() {
        lines.push(format!("{key} = {value}"));
    }

    lines.push(String::new());
    lines.push("[data]".to_string());
    lines
}
