use crate::math::matrix::Matrix;

pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE over every entry: mean(|expected - predicted|)
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        (expected - predicted).mean_abs()
    }

    /// MAE of an already-computed error matrix (`expected - predicted`).
    pub fn of_error(error: &Matrix) -> f64 {
        error.mean_abs()
    }
}
