//! Axis permutation of the EG table layout.
//!
//! EG tables are neither C- nor Fortran-ordered in dimension order. They are
//! column-major over the rotated axis order `[1, 2, ..., n-1, 0]`, called the
//! storage order here. Decode and encode both go through [`StorageLayout`], so
//! the two directions stay exact inverses.

use ndarray::{ArrayBase, ArrayD, Data, IxDyn, ShapeBuilder};

use crate::error::{EgError, Result};

/// Dimension index held by each storage axis: `[1, 2, ..., n-1, 0]`.
#[must_use]
pub fn permute_for_storage(dim_no: usize) -> Vec<usize> {
    if dim_no == 0 {
        return Vec::new();
    }
    (1..dim_no).chain(std::iter::once(0)).collect()
}

/// Storage axis holding each dimension: `[n-1, 0, 1, ..., n-2]`.
///
/// This is the inverse permutation of [`permute_for_storage`].
#[must_use]
pub fn permute_for_restore(dim_no: usize) -> Vec<usize> {
    if dim_no == 0 {
        return Vec::new();
    }
    std::iter::once(dim_no - 1).chain(0..dim_no - 1).collect()
}

/// Number of grid points spanned by `dim_sizes`.
///
/// Fails when the product does not fit in `usize`.
pub fn grid_points(dim_sizes: &[usize]) -> Result<usize> {
    dim_sizes
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| {
            EgError::shape_mismatch(format!("DimSize {dim_sizes:?} overflows the point count"))
        })
}

/// Dimension sizes together with the storage permutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    dim_sizes: Vec<usize>,
    storage: Vec<usize>,
    restore: Vec<usize>,
}

impl StorageLayout {
    /// Layout for dimensions of the given sizes, in canonical order.
    #[must_use]
    pub fn new(dim_sizes: &[usize]) -> Self {
        Self {
            dim_sizes: dim_sizes.to_vec(),
            storage: permute_for_storage(dim_sizes.len()),
            restore: permute_for_restore(dim_sizes.len()),
        }
    }

    /// Number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dim_sizes.len()
    }

    /// Total number of grid points.
    pub fn num_points(&self) -> Result<usize> {
        grid_points(&self.dim_sizes)
    }

    /// Dimension sizes in canonical order.
    #[must_use]
    pub fn dim_sizes(&self) -> &[usize] {
        &self.dim_sizes
    }

    /// Dimension sizes in storage order.
    #[must_use]
    pub fn storage_shape(&self) -> Vec<usize> {
        self.storage.iter().map(|&d| self.dim_sizes[d]).collect()
    }

    /// Storage-to-dimension permutation.
    #[must_use]
    pub fn storage_order(&self) -> &[usize] {
        &self.storage
    }

    /// Dimension-to-storage permutation.
    #[must_use]
    pub fn restore_order(&self) -> &[usize] {
        &self.restore
    }

    /// Storage axis of dimension `dim`.
    #[must_use]
    pub fn storage_axis(&self, dim: usize) -> usize {
        self.restore[dim]
    }

    /// Reshape a flat table column into the storage shape, column-major.
    pub fn reshape_column(&self, column: Vec<f64>) -> Result<ArrayD<f64>> {
        let points = self.num_points()?;
        if column.len() != points {
            return Err(EgError::shape_mismatch(format!(
                "column has {} values, dimensions {:?} need {points}",
                column.len(),
                self.dim_sizes,
            )));
        }
        let shape = self.storage_shape();
        Ok(ArrayD::from_shape_vec(IxDyn(&shape).f(), column)?)
    }
}

/// Flatten an array with the first index varying fastest.
pub fn flatten_column_major<S>(array: &ArrayBase<S, IxDyn>) -> Vec<f64>
where
    S: Data<Elem = f64>,
{
    array.t().iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations() {
        assert_eq!(permute_for_storage(1), vec![0]);
        assert_eq!(permute_for_restore(1), vec![0]);
        assert_eq!(permute_for_storage(2), vec![1, 0]);
        assert_eq!(permute_for_restore(2), vec![1, 0]);
        assert_eq!(permute_for_storage(4), vec![1, 2, 3, 0]);
        assert_eq!(permute_for_restore(4), vec![3, 0, 1, 2]);
        assert!(permute_for_storage(0).is_empty());
    }

    #[test]
    fn test_permutations_are_inverse() {
        for n in 1..8 {
            let storage = permute_for_storage(n);
            let restore = permute_for_restore(n);
            for dim in 0..n {
                assert_eq!(storage[restore[dim]], dim);
                assert_eq!(restore[storage[dim]], dim);
            }
        }
    }

    #[test]
    fn test_storage_shape() {
        let layout = StorageLayout::new(&[2, 3, 4]);
        assert_eq!(layout.storage_shape(), vec![3, 4, 2]);
        assert_eq!(layout.storage_axis(0), 2);
        assert_eq!(layout.storage_axis(1), 0);
        assert_eq!(layout.num_points().unwrap(), 24);
    }

    #[test]
    fn test_reshape_is_column_major() {
        let layout = StorageLayout::new(&[3, 2]);
        // storage shape [2, 3]; first index fastest
        let cube = layout
            .reshape_column(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        assert_eq!(cube.shape(), &[2, 3]);
        assert_eq!(cube[[0, 0]], 0.0);
        assert_eq!(cube[[1, 0]], 1.0);
        assert_eq!(cube[[0, 1]], 2.0);
        assert_eq!(cube[[1, 2]], 5.0);
        assert_eq!(
            flatten_column_major(&cube),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_reshape_length_mismatch() {
        let layout = StorageLayout::new(&[3, 2]);
        let err = layout.reshape_column(vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, EgError::ShapeMismatch { .. }));
    }
}
