use rand::SeedableRng;

use crate::{
    activation::sigmoid::{sigmoid, sigmoid_derivative},
    loss::mae::MaeLoss,
    math::{matrix::Matrix, rng::Mt19937},
    train::{
        dataset::{Dataset, INPUT_SIZE, OUTPUT_SIZE},
        error::TrainError,
        loop_fn::train_loop,
        report_stats::{ReportStats, TrainReport},
        train_config::TrainConfig,
    },
};

/// Width of the single hidden layer.
pub const HIDDEN_SIZE: usize = 4;

/// Activations of one forward pass over the dataset.
#[derive(Debug, Clone)]
pub struct Activations {
    /// `sigmoid(X · W0)`, one row per sample.
    pub hidden: Matrix,
    /// `sigmoid(hidden · W1)`, one row per sample.
    pub output: Matrix,
}

/// Scaled deltas for both synapses, as produced by `Trainer::weight_steps`.
#[derive(Debug, Clone)]
pub struct WeightSteps {
    pub synapse_0: Matrix,
    pub synapse_1: Matrix,
}

/// A 3-4-1 sigmoid perceptron together with the data it trains on.
///
/// The trainer exclusively owns both synapses; nothing outside it can mutate
/// them except through its update methods.
#[derive(Debug, Clone)]
pub struct Trainer {
    dataset: Dataset,
    synapse_0: Matrix,
    synapse_1: Matrix,
}

impl Trainer {
    /// Trainer over the XOR dataset with weights drawn from `seed`.
    pub fn new(seed: u64) -> Trainer {
        Trainer::with_dataset(Dataset::xor(), seed)
    }

    /// Trainer over the XOR dataset seeded from `config.seed`.
    pub fn from_config(config: &TrainConfig) -> Trainer {
        Trainer::new(config.seed)
    }

    /// Draws W0 (3x4, row-major) and then W1 (4x1) from one seeded stream.
    pub fn with_dataset(dataset: Dataset, seed: u64) -> Trainer {
        let mut rng = Mt19937::seed_from_u64(seed);
        let synapse_0 = Matrix::uniform(INPUT_SIZE, HIDDEN_SIZE, &mut rng);
        let synapse_1 = Matrix::uniform(HIDDEN_SIZE, OUTPUT_SIZE, &mut rng);
        Trainer { dataset, synapse_0, synapse_1 }
    }

    /// Trainer starting from explicit weights. Shapes are checked, values are not.
    pub fn from_weights(
        dataset: Dataset,
        synapse_0: Matrix,
        synapse_1: Matrix,
    ) -> Result<Trainer, TrainError> {
        if synapse_0.shape() != (INPUT_SIZE, HIDDEN_SIZE) {
            return Err(TrainError::Shape {
                what: "synapse 0",
                expected: (INPUT_SIZE, HIDDEN_SIZE),
                found: synapse_0.shape(),
            });
        }
        if synapse_1.shape() != (HIDDEN_SIZE, OUTPUT_SIZE) {
            return Err(TrainError::Shape {
                what: "synapse 1",
                expected: (HIDDEN_SIZE, OUTPUT_SIZE),
                found: synapse_1.shape(),
            });
        }
        Ok(Trainer { dataset, synapse_0, synapse_1 })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn synapse_0(&self) -> &Matrix {
        &self.synapse_0
    }

    pub fn synapse_1(&self) -> &Matrix {
        &self.synapse_1
    }

    /// Forward pass over the training inputs.
    pub fn forward(&self) -> Activations {
        self.forward_from(self.dataset.inputs())
    }

    fn forward_from(&self, inputs: &Matrix) -> Activations {
        let hidden = inputs.matrix_multiply(&self.synapse_0).map(sigmoid);
        let output = hidden.matrix_multiply(&self.synapse_1).map(sigmoid);
        Activations { hidden, output }
    }

    /// Output activations for arbitrary `n x 3` inputs.
    pub fn predict(&self, inputs: &Matrix) -> Result<Matrix, TrainError> {
        if inputs.cols != INPUT_SIZE {
            return Err(TrainError::Shape {
                what: "prediction inputs",
                expected: (inputs.rows, INPUT_SIZE),
                found: inputs.shape(),
            });
        }
        Ok(self.forward_from(inputs).output)
    }

    /// `targets - output` for the given activations.
    pub fn output_error(&self, activations: &Activations) -> Matrix {
        self.dataset.targets() - &activations.output
    }

    /// Mean absolute error of the current weights over the dataset.
    pub fn mean_abs_error(&self) -> f64 {
        MaeLoss::of_error(&self.output_error(&self.forward()))
    }

    /// Backpropagation deltas for one forward pass and its error, already
    /// scaled by `learning_rate`. Nothing is applied.
    ///
    /// The hidden-layer error is taken through the current W1. Deltas are
    /// meant to be added (ascent on `targets - output`).
    pub fn weight_steps(&self, activations: &Activations, error: &Matrix, learning_rate: f64) -> WeightSteps {
        let output_delta = error.elementwise_multiply(&activations.output.map(sigmoid_derivative));
        let hidden_error = output_delta.matrix_multiply(&self.synapse_1.transpose());
        let hidden_delta = hidden_error.elementwise_multiply(&activations.hidden.map(sigmoid_derivative));

        WeightSteps {
            synapse_0: self.dataset.inputs().transpose().matrix_multiply(&hidden_delta).scale(learning_rate),
            synapse_1: activations.hidden.transpose().matrix_multiply(&output_delta).scale(learning_rate),
        }
    }

    /// Adds `steps` to both synapses in place, finite or not.
    pub fn apply_steps(&mut self, steps: &WeightSteps) {
        self.synapse_0 += &steps.synapse_0;
        self.synapse_1 += &steps.synapse_1;
    }

    /// One backpropagation step: `weight_steps` followed by `apply_steps`.
    /// If the step overflows, the trainer is left holding the NaN/inf weights;
    /// check `non_finite_after` first to avoid that.
    pub fn apply_update(&mut self, activations: &Activations, error: &Matrix, learning_rate: f64) {
        let steps = self.weight_steps(activations, error, learning_rate);
        self.apply_steps(&steps);
    }

    /// Index of the first synapse that would hold a NaN or infinity after
    /// adding `steps`, if any.
    pub fn non_finite_after(&self, steps: &WeightSteps) -> Option<usize> {
        if !self.synapse_0.sum_is_finite(&steps.synapse_0) {
            Some(0)
        } else if !self.synapse_1.sum_is_finite(&steps.synapse_1) {
            Some(1)
        } else {
            None
        }
    }

    /// Index of the first synapse holding a NaN or infinity, if any.
    pub fn non_finite_synapse(&self) -> Option<usize> {
        if !self.synapse_0.is_finite() {
            Some(0)
        } else if !self.synapse_1.is_finite() {
            Some(1)
        } else {
            None
        }
    }

    pub fn train(&mut self, config: &TrainConfig) -> Result<TrainReport, TrainError> {
        train_loop(self, config, |_| {})
    }

    /// Like `train`, calling `on_report` at every reporting step as it happens.
    pub fn train_with_progress<F>(
        &mut self,
        config: &TrainConfig,
        on_report: F,
    ) -> Result<TrainReport, TrainError>
    where
        F: FnMut(&ReportStats),
    {
        train_loop(self, config, on_report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_one_reproduces_reference_initial_weights() {
        let t = Trainer::new(1);
        let w0 = [
            [-0.165_955_99, 0.440_648_99, -0.999_771_25, -0.395_334_85],
            [-0.706_488_22, -0.815_322_81, -0.627_479_58, -0.308_878_55],
            [-0.206_465_05, 0.077_633_47, -0.161_610_97, 0.370_439_00],
        ];
        let w1 = [-0.591_095_50, 0.756_234_87, -0.945_224_81, 0.340_935_02];
        for (i, row) in w0.iter().enumerate() {
            for (j, want) in row.iter().enumerate() {
                assert!((t.synapse_0().data[i][j] - want).abs() < 1e-7);
            }
        }
        for (i, want) in w1.iter().enumerate() {
            assert!((t.synapse_1().data[i][0] - want).abs() < 1e-7);
        }
    }

    #[test]
    fn same_seed_gives_identical_weights() {
        let a = Trainer::new(99);
        let b = Trainer::new(99);
        assert_eq!(a.synapse_0(), b.synapse_0());
        assert_eq!(a.synapse_1(), b.synapse_1());
        assert_ne!(a.synapse_0(), Trainer::new(100).synapse_0());
    }

    #[test]
    fn activations_stay_in_open_unit_interval() {
        let act = Trainer::new(5).forward();
        assert_eq!(act.hidden.shape(), (4, 4));
        assert_eq!(act.output.shape(), (4, 1));
        for x in act.hidden.data.iter().chain(act.output.data.iter()).flatten() {
            assert!(*x > 0.0 && *x < 1.0);
        }
    }

    #[test]
    fn from_config_seeds_from_the_config() {
        let mut config = TrainConfig::new(10, 1);
        config.seed = 7;
        let t = Trainer::from_config(&config);
        assert!((t.synapse_0().data[0][0] - -0.847_383_421_252_085_7).abs() < 1e-12);
        assert_eq!(t.synapse_0(), Trainer::new(7).synapse_0());
        assert_ne!(t.synapse_0(), Trainer::from_config(&TrainConfig::default()).synapse_0());
    }

    #[test]
    fn non_finite_after_looks_ahead_without_applying() {
        let t = Trainer::new(1);
        let finite = WeightSteps { synapse_0: Matrix::zeros(3, 4), synapse_1: Matrix::zeros(4, 1) };
        assert_eq!(t.non_finite_after(&finite), None);

        let mut overflow = finite.clone();
        overflow.synapse_1.data[2][0] = f64::MAX;
        overflow.synapse_0.data[0][0] = f64::NAN;
        assert_eq!(t.non_finite_after(&overflow), Some(0));
        overflow.synapse_0.data[0][0] = 0.0;
        overflow.synapse_1.data[2][0] = f64::INFINITY;
        assert_eq!(t.non_finite_after(&overflow), Some(1));
        assert_eq!(t.non_finite_synapse(), None);
    }

    #[test]
    fn predict_on_training_inputs_matches_forward() {
        let t = Trainer::new(1);
        let predicted = t.predict(t.dataset().inputs()).unwrap();
        assert_eq!(predicted, t.forward().output);
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let t = Trainer::new(1);
        assert!(matches!(
            t.predict(&Matrix::zeros(2, 4)),
            Err(TrainError::Shape { what: "prediction inputs", .. })
        ));
    }

    #[test]
    fn from_weights_checks_shapes() {
        let err = Trainer::from_weights(Dataset::xor(), Matrix::zeros(4, 3), Matrix::zeros(4, 1))
            .unwrap_err();
        assert!(matches!(err, TrainError::Shape { what: "synapse 0", .. }));
        let err = Trainer::from_weights(Dataset::xor(), Matrix::zeros(3, 4), Matrix::zeros(1, 4))
            .unwrap_err();
        assert!(matches!(err, TrainError::Shape { what: "synapse 1", .. }));
    }

    #[test]
    fn zero_learning_rate_leaves_weights_alone() {
        let mut t = Trainer::new(3);
        let before = t.clone();
        let act = t.forward();
        let err = t.output_error(&act);
        t.apply_update(&act, &err, 0.0);
        assert_eq!(t.synapse_0(), before.synapse_0());
        assert_eq!(t.synapse_1(), before.synapse_1());
    }

    #[test]
    fn one_update_reduces_error() {
        let mut t = Trainer::new(1);
        let before = t.mean_abs_error();
        let act = t.forward();
        let err = t.output_error(&act);
        t.apply_update(&act, &err, 1.0);
        assert!(t.mean_abs_error() < before);
    }
}
