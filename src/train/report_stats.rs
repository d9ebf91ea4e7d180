use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// One reporting step emitted by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    /// 0-based iteration index the report was taken at.
    pub iteration: usize,
    /// Mean absolute error of the output layer before that iteration's update.
    pub mean_abs_error: f64,
}

/// Result of a completed training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Every reporting step, in order.
    pub history: Vec<ReportStats>,
    /// Number of weight updates actually applied.
    pub updates: usize,
    /// Output-layer activations of the last forward pass.
    pub output: Matrix,
    /// Mean absolute error of `output`.
    pub final_error: f64,
    /// First iteration whose update produced non-finite weights, when the
    /// run was allowed to continue past it.
    pub non_finite_at: Option<usize>,
}
