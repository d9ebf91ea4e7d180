pub mod linear;

pub use linear::{LinearRegression, RegressionError};
