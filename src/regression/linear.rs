use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    LengthMismatch { xs: usize, ys: usize },
    TooFewPoints(usize),
    /// Every x is the same, so the slope is undefined.
    ZeroVariance,
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::LengthMismatch { xs, ys } => {
                write!(f, "got {xs} x values but {ys} y values")
            }
            RegressionError::TooFewPoints(n) => {
                write!(f, "need at least 2 points to fit a line, got {n}")
            }
            RegressionError::ZeroVariance => write!(f, "all x values are identical"),
        }
    }
}

impl std::error::Error for RegressionError {}

/// Single-feature ordinary least squares: `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    fn check_points(xs: &[f64], ys: &[f64]) -> Result<(), RegressionError> {
        if xs.len() != ys.len() {
            return Err(RegressionError::LengthMismatch { xs: xs.len(), ys: ys.len() });
        }
        if xs.len() < 2 {
            return Err(RegressionError::TooFewPoints(xs.len()));
        }
        Ok(())
    }

    /// Closed-form least-squares fit.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<LinearRegression, RegressionError> {
        Self::check_points(xs, ys)?;

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let (cov, var) = xs.iter().zip(ys.iter())
            .fold((0.0, 0.0), |(cov, var), (x, y)| {
                let dx = x - mean_x;
                (cov + dx * (y - mean_y), var + dx * dx)
            });
        if var == 0.0 {
            return Err(RegressionError::ZeroVariance);
        }

        let slope = cov / var;
        Ok(LinearRegression { slope, intercept: mean_y - slope * mean_x })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Coefficient of determination on the given points. 1.0 when every y is
    /// identical and the line hits them all. The points are checked the same
    /// way `fit` checks them.
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> Result<f64, RegressionError> {
        Self::check_points(xs, ys)?;

        let mean_y = ys.iter().sum::<f64>() / ys.len() as f64;
        let ss_res: f64 = xs.iter().zip(ys.iter())
            .map(|(&x, &y)| (y - self.predict(x)).powi(2))
            .sum();
        let ss_tot: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let xs: Vec<f64> = (-5..=5).map(|i| i as f64 * 0.5).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 2.0).collect();
        let model = LinearRegression::fit(&xs, &ys).unwrap();
        assert!((model.slope - 3.0).abs() < 1e-12);
        assert!((model.intercept - 2.0).abs() < 1e-12);
        assert!((model.r_squared(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
        assert!((model.predict(10.0) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_points_fit_between_them() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.5, 5.5, 8.0];
        let model = LinearRegression::fit(&xs, &ys).unwrap();
        // cov = 9.5, var = 5
        assert!((model.slope - 1.9).abs() < 1e-12);
        assert!((model.intercept - 0.25).abs() < 1e-12);
        let r2 = model.r_squared(&xs, &ys).unwrap();
        assert!(r2 > 0.9 && r2 < 1.0);
        assert_eq!(model.predict_all(&xs).len(), 4);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            LinearRegression::fit(&[1.0, 2.0], &[1.0]),
            Err(RegressionError::LengthMismatch { xs: 2, ys: 1 })
        );
        assert_eq!(
            LinearRegression::fit(&[1.0], &[1.0]),
            Err(RegressionError::TooFewPoints(1))
        );
        assert_eq!(
            LinearRegression::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(RegressionError::ZeroVariance)
        );
    }

    #[test]
    fn r_squared_rejects_bad_points() {
        let model = LinearRegression { slope: 1.0, intercept: 0.0 };
        assert_eq!(model.r_squared(&[], &[]), Err(RegressionError::TooFewPoints(0)));
        assert_eq!(
            model.r_squared(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(RegressionError::LengthMismatch { xs: 3, ys: 2 })
        );
        assert_eq!(model.r_squared(&[1.0, 2.0], &[1.0, 2.0]), Ok(1.0));
    }
}
