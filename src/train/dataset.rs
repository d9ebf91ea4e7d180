use crate::math::matrix::Matrix;
use crate::train::error::TrainError;

/// Width of every input row.
pub const INPUT_SIZE: usize = 3;
/// Width of every target row.
pub const OUTPUT_SIZE: usize = 1;

/// Fixed training data: one sample per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    inputs: Matrix,
    targets: Matrix,
}

impl Dataset {
    /// Checks that `inputs` is n x 3 and `targets` is n x 1 with n > 0.
    pub fn new(inputs: Matrix, targets: Matrix) -> Result<Dataset, TrainError> {
        if inputs.rows == 0 || inputs.cols != INPUT_SIZE {
            return Err(TrainError::Shape {
                what: "dataset inputs",
                expected: (inputs.rows.max(1), INPUT_SIZE),
                found: inputs.shape(),
            });
        }
        if targets.shape() != (inputs.rows, OUTPUT_SIZE) {
            return Err(TrainError::Shape {
                what: "dataset targets",
                expected: (inputs.rows, OUTPUT_SIZE),
                found: targets.shape(),
            });
        }
        Ok(Dataset { inputs, targets })
    }

    /// The 4-sample XOR-like set: the label is the XOR of the first two
    /// columns; the third column is a constant 1 acting as a bias input.
    pub fn xor() -> Dataset {
        Dataset {
            inputs: Matrix::from_data(vec![
                vec![0.0, 0.0, 1.0],
                vec![0.0, 1.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![1.0, 1.0, 1.0],
            ]),
            targets: Matrix::from_data(vec![
                vec![0.0],
                vec![1.0],
                vec![1.0],
                vec![0.0],
            ]),
        }
    }

    pub fn inputs(&self) -> &Matrix {
        &self.inputs
    }

    pub fn targets(&self) -> &Matrix {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.inputs.rows
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows == 0
    }
}
