use crate::math::matrix::Matrix;

/// Constant fed through every bias weight.
pub const BIAS: f64 = -1.0;

/// A sample matrix carrying a constant bias row at index 0.
///
/// The wrapper keeps the bias row out of reach: sample permutations move
/// whole columns and the row stays all `BIAS`.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasAugmented {
    inner: Matrix,
}

impl BiasAugmented {
    /// Prepends the bias row to a `features x samples` matrix.
    pub fn with_bias(features: &Matrix) -> BiasAugmented {
        BiasAugmented {
            inner: features.prepend_row(vec![BIAS; features.cols]),
        }
    }

    /// The full `(features + 1) x samples` matrix, bias row included.
    pub fn matrix(&self) -> &Matrix {
        &self.inner
    }

    pub fn samples(&self) -> usize {
        self.inner.cols
    }

    /// Number of rows excluding the bias row.
    pub fn features(&self) -> usize {
        self.inner.rows - 1
    }

    /// The original data rows without the bias row.
    pub fn data_rows(&self) -> Matrix {
        self.inner.skip_rows(1)
    }

    /// Reorders sample columns in place.
    pub fn permute_samples(&mut self, order: &[usize]) {
        self.inner = self.inner.select_columns(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_row_survives_permutation() {
        let x = Matrix::from_data(vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        let mut aug = BiasAugmented::with_bias(&x);
        assert_eq!(aug.features(), 2);
        aug.permute_samples(&[1, 2, 0]);
        assert_eq!(aug.matrix().data[0], vec![BIAS; 3]);
        assert_eq!(aug.data_rows().data, vec![vec![1.0, 2.0, 0.0], vec![4.0, 5.0, 3.0]]);
    }
}
