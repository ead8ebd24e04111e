use rand::Rng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

use crate::error::{Error, Result};

/// Dense row-major matrix. In this crate columns are samples and rows are
/// features or neurons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![value; cols]; rows]
        }
    }

    /// Independent uniform draws in [0, 1).
    pub fn random_uniform<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>();
            }
        }

        res
    }

    /// Builds a matrix from rows. Fails on ragged rows.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(Error::DimensionMismatch(format!(
                "row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.shape(), other.shape(), "hadamard operands differ in shape");
        let data = self.data.iter().zip(other.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Rounds every entry to `decimals` decimal digits, half away from zero.
    pub fn round_to(&self, decimals: u32) -> Matrix {
        let factor = 10f64.powi(decimals as i32);
        self.map(|x| (x * factor).round() / factor)
    }

    /// True when every entry times 10^decimals is an integer within `tol`.
    pub fn is_quantized(&self, decimals: u32, tol: f64) -> bool {
        let factor = 10f64.powi(decimals as i32);
        self.data.iter().flatten().all(|&x| {
            let scaled = x * factor;
            (scaled - scaled.round()).abs() <= tol
        })
    }

    /// New matrix whose column `j` is column `order[j]` of `self`.
    pub fn select_columns(&self, order: &[usize]) -> Matrix {
        let data = self.data.iter()
            .map(|row| order.iter().map(|&j| row[j]).collect())
            .collect();
        Matrix { rows: self.rows, cols: order.len(), data }
    }

    /// Drops the first `count` rows.
    pub fn skip_rows(&self, count: usize) -> Matrix {
        let data: Vec<Vec<f64>> = self.data.iter().skip(count).cloned().collect();
        Matrix { rows: data.len(), cols: self.cols, data }
    }

    /// Stacks `row` on top of `self`.
    pub fn prepend_row(&self, row: Vec<f64>) -> Matrix {
        assert_eq!(row.len(), self.cols, "prepended row has the wrong length");
        let mut data = Vec::with_capacity(self.rows + 1);
        data.push(row);
        data.extend(self.data.iter().cloned());
        Matrix { rows: self.rows + 1, cols: self.cols, data }
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[j]).collect()
    }

    /// Mean over all entries; NaN for an empty matrix.
    pub fn mean(&self) -> f64 {
        let n = (self.rows * self.cols) as f64;
        self.data.iter().flatten().sum::<f64>() / n
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res =  Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}
