//! Tabular overview of a decoded dataset.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use eg_format::Dataset;

/// Printable description of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub diag: Option<String>,
    pub shot_no: Option<i64>,
    pub points: usize,
    pub dims: Vec<AxisSummary>,
    pub variables: Vec<AxisSummary>,
    pub attrs: Vec<(String, String)>,
}

/// One coordinate or data variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    pub name: String,
    pub units: String,
    pub shape: String,
    pub range: String,
}

/// Collect the summary of a dataset.
#[must_use]
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let dims = dataset
        .coords
        .iter()
        .map(|coord| AxisSummary {
            name: coord.name.clone(),
            units: coord.units.clone(),
            shape: coord.len().to_string(),
            range: value_range(coord.values.iter().copied()),
        })
        .collect();
    let variables = dataset
        .data_vars
        .iter()
        .map(|var| AxisSummary {
            name: var.name.clone(),
            units: var.units.clone(),
            shape: var
                .data
                .shape()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("x"),
            range: value_range(var.data.iter().copied()),
        })
        .collect();
    DatasetSummary {
        diag: dataset.attrs.get("diag").map(str::to_string),
        shot_no: dataset.shot_no,
        points: dataset.num_points(),
        dims,
        variables,
        attrs: dataset
            .attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// `min .. max` over the finite values, or `-` when there are none.
fn value_range(values: impl Iterator<Item = f64>) -> String {
    let bounds = values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    });
    match bounds {
        Some((lo, hi)) => format!("{lo} .. {hi}"),
        None => "-".to_string(),
    }
}

/// Build the dimension, variable and attribute tables.
#[must_use]
pub fn summary_tables(summary: &DatasetSummary) -> Vec<Table> {
    let mut axes = Table::new();
    axes.set_header(vec![
        header_cell("Kind"),
        header_cell("Name"),
        header_cell("Units"),
        header_cell("Shape"),
        header_cell("Range"),
    ]);
    apply_table_style(&mut axes);
    align_column(&mut axes, 3, CellAlignment::Right);
    for dim in &summary.dims {
        axes.add_row(axis_row("dim", dim, Color::Cyan));
    }
    for var in &summary.variables {
        axes.add_row(axis_row("var", var, Color::Green));
    }

    let mut tables = vec![axes];
    if !summary.attrs.is_empty() {
        let mut attrs = Table::new();
        attrs.set_header(vec![header_cell("Attribute"), header_cell("Value")]);
        apply_table_style(&mut attrs);
        for (key, value) in &summary.attrs {
            attrs.add_row(vec![Cell::new(key), Cell::new(value)]);
        }
        tables.push(attrs);
    }
    tables
}

pub fn print_summary(summary: &DatasetSummary) {
    println!("Diagnostic: {}", summary.diag.as_deref().unwrap_or("-"));
    match summary.shot_no {
        Some(shot) => println!("Shot: {shot}"),
        None => println!("Shot: -"),
    }
    println!("Points: {}", summary.points);
    for table in summary_tables(summary) {
        println!("{table}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn axis_row(kind: &str, axis: &AxisSummary, color: Color) -> Vec<Cell> {
    vec![
        dim_cell(kind),
        Cell::new(&axis.name).fg(color).add_attribute(Attribute::Bold),
        if axis.units.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&axis.units)
        },
        Cell::new(&axis.shape),
        Cell::new(&axis.range),
    ]
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
