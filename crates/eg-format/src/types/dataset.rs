//! Decoded multi-dimensional dataset.

use ndarray::{Array1, ArrayD};

use super::Attrs;

/// A named 1-D coordinate axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Dimension name.
    pub name: String,
    /// Axis values.
    pub values: Array1<f64>,
    /// Physical units, empty when unknown.
    pub units: String,
}

impl Coordinate {
    /// Create a coordinate.
    pub fn new(name: impl Into<String>, values: Array1<f64>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values,
            units: units.into(),
        }
    }

    /// Number of points on this axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named N-D data variable defined over the dataset dimensions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataVariable {
    /// Variable name, with illegal characters substituted.
    pub name: String,
    /// Values, one axis per dataset dimension in `dims` order.
    pub data: ArrayD<f64>,
    /// Physical units, empty when unknown.
    pub units: String,
}

impl DataVariable {
    /// Create a data variable.
    pub fn new(name: impl Into<String>, data: ArrayD<f64>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data,
            units: units.into(),
        }
    }
}

/// Labeled multi-axis dataset.
///
/// # Example
///
/// ```
/// use eg_format::{Coordinate, DataVariable, Dataset};
/// use ndarray::{Array1, ArrayD, IxDyn};
///
/// let mut ds = Dataset::new();
/// ds.push_coord(Coordinate::new("R", Array1::from(vec![0.0, 1.0, 2.0]), "m"));
/// ds.push_data_var(DataVariable::new(
///     "Te",
///     ArrayD::from_shape_vec(IxDyn(&[3]), vec![10.0, 20.0, 30.0]).unwrap(),
///     "eV",
/// ));
/// ds.shot_no = Some(100);
///
/// assert_eq!(ds.dims, vec!["R".to_string()]);
/// assert_eq!(ds.shape(), vec![3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    /// Dimension names in canonical order.
    pub dims: Vec<String>,
    /// One coordinate per dimension, in `dims` order.
    pub coords: Vec<Coordinate>,
    /// Scalar `ShotNo` coordinate.
    pub shot_no: Option<i64>,
    /// Data variables.
    pub data_vars: Vec<DataVariable>,
    /// Free-form metadata.
    pub attrs: Attrs,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dimension together with its coordinate.
    pub fn push_coord(&mut self, coord: Coordinate) {
        self.dims.push(coord.name.clone());
        self.coords.push(coord);
    }

    /// Append a data variable.
    pub fn push_data_var(&mut self, var: DataVariable) {
        self.data_vars.push(var);
    }

    /// Look up a coordinate by dimension name.
    #[must_use]
    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.name == name)
    }

    /// Look up a data variable by name.
    #[must_use]
    pub fn data_var(&self, name: &str) -> Option<&DataVariable> {
        self.data_vars.iter().find(|v| v.name == name)
    }

    /// Mutable lookup of a data variable by name.
    pub fn data_var_mut(&mut self, name: &str) -> Option<&mut DataVariable> {
        self.data_vars.iter_mut().find(|v| v.name == name)
    }

    /// Dimension lengths in `dims` order. Dimensions without a coordinate count as 0.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.dims
            .iter()
            .map(|d| self.coord(d).map_or(0, Coordinate::len))
            .collect()
    }

    /// Number of grid points, saturating at `usize::MAX`.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.shape().iter().fold(1, |acc, &n| acc.saturating_mul(n))
    }
}
