use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::{AddAssign, Sub};

use crate::math::rng::Mt19937;

/// Dense row-major matrix of `f64`.
///
/// Products are deliberately not exposed through operator overloading:
/// `matrix_multiply` and `elementwise_multiply` are separate named methods so a
/// call site always states which one it means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Fills a `rows x cols` matrix with samples uniform on [-1, 1), drawn
    /// row by row from `rng`.
    pub fn uniform(rows: usize, cols: usize, rng: &mut Mt19937) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = 2.0 * rng.next_f64() - 1.0;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows must all have the same length"
        );
        Matrix {
            rows,
            cols,
            data
        }
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

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Matrix product `self · rhs`.
    ///
    /// # Panics
    /// Panics if `self.cols != rhs.rows`.
    pub fn matrix_multiply(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!(
                "matrix_multiply: cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

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

    /// Element-wise (Hadamard) product of two same-shape matrices.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn elementwise_multiply(&self, rhs: &Matrix) -> Matrix {
        if self.shape() != rhs.shape() {
            panic!(
                "elementwise_multiply: shapes {}x{} and {}x{} differ",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Mean of the absolute values of all entries. Zero for an empty matrix.
    pub fn mean_abs(&self) -> f64 {
        let n = self.rows * self.cols;
        if n == 0 {
            return 0.0;
        }
        self.data.iter().flatten().map(|x| x.abs()).sum::<f64>() / n as f64
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|x| x.is_finite())
    }

    /// Whether `self + rhs` would be all finite, without building it.
    pub fn sum_is_finite(&self, rhs: &Matrix) -> bool {
        self.data.iter().flatten()
            .zip(rhs.data.iter().flatten())
            .all(|(x, y)| (x + y).is_finite())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

// One bracketed row per line, e.g.
// [[0.0071]
//  [0.9936]]
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match f.precision() {
                    Some(p) => write!(f, "{:.*}", p, x)?,
                    None => write!(f, "{:.8}", x)?,
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.shape() != rhs.shape() {
            panic!(
                "add_assign: shapes {}x{} and {}x{} differ",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (x, y) in row.iter_mut().zip(rhs_row.iter()) {
                *x += y;
            }
        }
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Matrix {
        if self.shape() != rhs.shape() {
            panic!(
                "sub: shapes {}x{} and {}x{} differ",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x - y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }
}
