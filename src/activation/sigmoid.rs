use std::f64::consts::E;

/// Logistic function `1 / (1 + e^-x)`. Returns values in (0, 1) for finite `x`
/// (it rounds to exactly 0.0 or 1.0 only for |x| beyond ~37).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Slope of the logistic function expressed through its output.
///
/// `activation` must already be `sigmoid(z)`; passing the pre-activation `z`
/// gives a meaningless result.
pub fn sigmoid_derivative(activation: f64) -> f64 {
    activation * (1.0 - activation)
}
