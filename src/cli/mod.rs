pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, RegressArgs, TrainArgs};

use synapse_nn::{LinearRegression, TrainConfig, Trainer};

#[derive(Parser, Debug)]
#[command(
    name = "synapse-nn",
    version,
    about = "Two-layer sigmoid network trained by hand-written backpropagation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
            Commands::Regress(args) => run_regress(args),
        }
    }
}

fn build_config(args: &TrainArgs) -> Result<TrainConfig> {
    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => TrainConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(interval) = args.report_interval {
        config.report_interval = interval;
    }
    if let Some(lr) = args.learning_rate {
        config.learning_rate = lr;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.allow_non_finite {
        config.halt_on_non_finite = false;
    }

    config.validate()?;
    Ok(config)
}

fn run_train(args: TrainArgs) -> Result<()> {
    let config = build_config(&args)?;
    tracing::info!(seed = config.seed, "initialising weights");

    let mut trainer = Trainer::from_config(&config);
    let report = trainer
        .train_with_progress(&config, |stats| println!("Error {}", stats.mean_abs_error))
        .context("training failed")?;

    if let Some(iteration) = report.non_finite_at {
        eprintln!("warning: weights became non-finite at iteration {iteration}");
    }

    println!("Output after training");
    println!("{}", report.output);
    Ok(())
}

fn run_regress(args: RegressArgs) -> Result<()> {
    let model = LinearRegression::fit(&args.x, &args.y).context("fitting line")?;
    tracing::debug!(points = args.x.len(), "fitted regression line");

    println!("slope     {}", model.slope);
    println!("intercept {}", model.intercept);
    println!("r^2       {}", model.r_squared(&args.x, &args.y)?);
    if let Some(x) = args.predict {
        println!("y({x}) = {}", model.predict(x));
    }
    Ok(())
}
