use clap::{Args, Subcommand, ValueEnum};

use synapse_nn::UpdateMode;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the 3-4-1 network on the XOR dataset
    Train(TrainArgs),

    /// Fit a least-squares line through the given points
    Regress(RegressArgs),
}

/// Flags given here override values loaded from `--config`.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON file with a TrainConfig; missing fields use the defaults
    #[arg(long)]
    pub config: Option<String>,

    /// Number of forward passes over the dataset
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Report every N iterations
    #[arg(long)]
    pub report_interval: Option<usize>,

    /// Scale applied to every weight update
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// `faithful` learns only on reporting iterations, `corrected` on every one
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for the initial weights
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep training after weights turn NaN/inf instead of stopping
    #[arg(long)]
    pub allow_non_finite: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Faithful,
    Corrected,
}

impl From<ModeArg> for UpdateMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Faithful => UpdateMode::Faithful,
            ModeArg::Corrected => UpdateMode::Corrected,
        }
    }
}

#[derive(Args, Debug)]
pub struct RegressArgs {
    /// Comma-separated x values
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub x: Vec<f64>,

    /// Comma-separated y values, same count as --x
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub y: Vec<f64>,

    /// Also print the fitted value at this x
    #[arg(long, allow_negative_numbers = true)]
    pub predict: Option<f64>,
}
