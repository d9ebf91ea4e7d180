use serde::{Serialize, Deserialize};

use crate::train::error::TrainError;

/// Which iterations apply a weight update.
///
/// - `Faithful`  : update only on reporting iterations (`j % report_interval == 0`),
///                 the historical schedule, where all other iterations
///                 recompute the forward pass and discard it.
/// - `Corrected` : update on every iteration; only reporting stays gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Faithful,
    Corrected,
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`         : forward passes over the whole dataset
/// - `report_interval`    : report (and, in `Faithful` mode, update) when
///                          `iteration % report_interval == 0`
/// - `learning_rate`      : scale applied to each weight delta; 1.0 is the
///                          unscaled reference update
/// - `mode`               : see `UpdateMode`
/// - `seed`               : seed for the initial weights
/// - `halt_on_non_finite` : stop with `TrainError::NonFiniteWeights` as soon
///                          as an update yields NaN/inf; when `false` training
///                          carries on with the corrupted weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub iterations: usize,
    pub report_interval: usize,
    pub learning_rate: f64,
    pub mode: UpdateMode,
    pub seed: u64,
    pub halt_on_non_finite: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 10_000_000,
            report_interval: 100_000,
            learning_rate: 1.0,
            mode: UpdateMode::Faithful,
            seed: 1,
            halt_on_non_finite: true,
        }
    }
}

impl TrainConfig {
    /// Creates a config with the given schedule and the reference defaults
    /// for everything else.
    pub fn new(iterations: usize, report_interval: usize) -> Self {
        TrainConfig {
            iterations,
            report_interval,
            ..TrainConfig::default()
        }
    }

    pub fn with_mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn validate(&self) -> Result<(), TrainError> {
        if self.report_interval == 0 {
            return Err(TrainError::InvalidConfig(
                "report_interval must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() {
            return Err(TrainError::InvalidConfig(format!(
                "learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), TrainError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file. Missing fields fall back to
    /// the defaults.
    pub fn load_json(path: &str) -> Result<TrainConfig, TrainError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
