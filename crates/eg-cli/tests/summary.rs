//! Snapshot tests for the dataset summary.

use eg_cli::summary::{summarize, summary_tables};
use eg_format::read_eg_str;

const INPUT: &str = "\
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
# Operator = 'lab'
#
# [data]
0, 10
1, 20
2, 30
";

#[test]
fn summary_snapshot() {
    let dataset = read_eg_str(INPUT).unwrap();
    let summary = summarize(&dataset);
    insta::assert_json_snapshot!(summary, @r#"
    {
      "diag": "te",
      "shot_no": 100,
      "points": 3,
      "dims": [
        {
          "name": "R",
          "units": "m",
          "shape": "3",
          "range": "0 .. 2"
        }
      ],
      "variables": [
        {
          "name": "Te",
          "units": "eV",
          "shape": "3",
          "range": "10 .. 30"
        }
      ],
      "attrs": [
        [
          "diag",
          "te"
        ],
        [
          "Date",
          "01/01/2020 00:00"
        ],
        [
          "Operator",
          "'lab'"
        ]
      ]
    }
    "#);
}

#[test]
fn summary_tables_list_axes_and_attrs() {
    let dataset = read_eg_str(INPUT).unwrap();
    let tables = summary_tables(&summarize(&dataset));
    assert_eq!(tables.len(), 2);

    let axes = tables[0].to_string();
    assert!(axes.contains("Te"));
    assert!(axes.contains("10 .. 30"));
    let attrs = tables[1].to_string();
    assert!(attrs.contains("Operator"));
    assert!(attrs.contains("01/01/2020 00:00"));
}
