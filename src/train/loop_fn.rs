use std::time::Instant;

use crate::loss::mae::MaeLoss;
use crate::train::error::TrainError;
use crate::train::report_stats::{ReportStats, TrainReport};
use crate::train::train_config::{TrainConfig, UpdateMode};
use crate::train::trainer::Trainer;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Runs `config.iterations` forward passes over the trainer's dataset and
/// returns the run's history and final output.
///
/// Iteration `j` is a reporting step when `j % config.report_interval == 0`.
/// Its error is taken from the forward pass *before* that iteration's update
/// and handed to `on_report`. Updates follow `config.mode`.
///
/// # Errors
/// - `TrainError::InvalidConfig` if the config fails validation
/// - `TrainError::NonFiniteWeights` if an update would yield NaN/inf and
///   `config.halt_on_non_finite` is set. That update is not applied, so the
///   trainer keeps the last weights it had before it. The history collected
///   up to that point is dropped.
pub fn train_loop<F>(
    trainer: &mut Trainer,
    config: &TrainConfig,
    mut on_report: F,
) -> Result<TrainReport, TrainError>
where
    F: FnMut(&ReportStats),
{
    config.validate()?;

    tracing::info!(
        iterations = config.iterations,
        report_interval = config.report_interval,
        learning_rate = config.learning_rate,
        mode = ?config.mode,
        "training started"
    );
    if config.mode == UpdateMode::Faithful && config.report_interval > 1 {
        tracing::debug!(
            "faithful mode: only 1 in {} iterations updates the weights",
            config.report_interval
        );
    }

    let t_start = Instant::now();
    let mut history = Vec::with_capacity(config.iterations / config.report_interval + 1);
    let mut updates = 0;
    let mut non_finite_at = None;
    let mut last_output = None;

    for iteration in 0..config.iterations {
        let activations = trainer.forward();
        let error = trainer.output_error(&activations);

        let is_report_step = iteration % config.report_interval == 0;
        if is_report_step {
            let stats = ReportStats {
                iteration,
                mean_abs_error: MaeLoss::of_error(&error),
            };
            tracing::debug!(iteration, mean_abs_error = stats.mean_abs_error, "report");
            on_report(&stats);
            history.push(stats);
        }

        let should_update = match config.mode {
            UpdateMode::Faithful => is_report_step,
            UpdateMode::Corrected => true,
        };
        if should_update {
            let steps = trainer.weight_steps(&activations, &error, config.learning_rate);

            if non_finite_at.is_none() {
                if let Some(synapse) = trainer.non_finite_after(&steps) {
                    if config.halt_on_non_finite {
                        tracing::error!(iteration, synapse, "update would diverge, halting");
                        return Err(TrainError::NonFiniteWeights { iteration, synapse });
                    }
                    tracing::warn!(iteration, synapse, "weights diverged, continuing");
                    non_finite_at = Some(iteration);
                }
            }

            trainer.apply_steps(&steps);
            updates += 1;
        }

        last_output = Some(activations.output);
    }

    // With zero iterations there is no "last pass"; fall back to the current weights.
    let output = match last_output {
        Some(output) => output,
        None => trainer.forward().output,
    };
    let final_error = MaeLoss::loss(&output, trainer.dataset().targets());

    tracing::info!(
        updates,
        final_error,
        elapsed_ms = t_start.elapsed().as_millis() as u64,
        "training finished"
    );

    Ok(TrainReport {
        history,
        updates,
        output,
        final_error,
        non_finite_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use crate::train::dataset::Dataset;

    #[test]
    fn faithful_mode_updates_only_on_report_steps() {
        let mut t = Trainer::new(1);
        let report = t.train(&TrainConfig::new(1_000, 100)).unwrap();
        assert_eq!(report.updates, 10);
        let iterations: Vec<usize> = report.history.iter().map(|s| s.iteration).collect();
        assert_eq!(iterations, (0..1_000).step_by(100).collect::<Vec<_>>());
    }

    #[test]
    fn corrected_mode_updates_every_iteration() {
        let mut t = Trainer::new(1);
        let config = TrainConfig::new(250, 100).with_mode(UpdateMode::Corrected);
        let report = t.train(&config).unwrap();
        assert_eq!(report.updates, 250);
        assert_eq!(report.history.len(), 3);
    }

    #[test]
    fn first_report_is_error_of_initial_weights() {
        let mut t = Trainer::new(1);
        let initial = t.mean_abs_error();
        let report = t.train(&TrainConfig::new(1, 100_000)).unwrap();
        assert_eq!(report.history[0].iteration, 0);
        assert_eq!(report.history[0].mean_abs_error, initial);
    }

    #[test]
    fn idle_iterations_do_not_touch_weights() {
        let mut a = Trainer::new(4);
        let mut b = Trainer::new(4);
        a.train(&TrainConfig::new(1, 10)).unwrap();
        b.train(&TrainConfig::new(10, 10)).unwrap();
        assert_eq!(a.synapse_0(), b.synapse_0());
        assert_eq!(a.synapse_1(), b.synapse_1());
    }

    #[test]
    fn output_is_last_pre_update_forward_pass() {
        let mut t = Trainer::new(2);
        let mut shadow = t.clone();
        let report = t.train(&TrainConfig::new(1, 1)).unwrap();
        assert_eq!(report.output, shadow.forward().output);
        // and weights did move afterwards
        let act = shadow.forward();
        let err = shadow.output_error(&act);
        shadow.apply_update(&act, &err, 1.0);
        assert_eq!(t.synapse_0(), shadow.synapse_0());
    }

    #[test]
    fn zero_iterations_reports_current_prediction() {
        let mut t = Trainer::new(1);
        let report = t.train(&TrainConfig::new(0, 100)).unwrap();
        assert!(report.history.is_empty());
        assert_eq!(report.updates, 0);
        assert_eq!(report.output, t.forward().output);
    }

    #[test]
    fn progress_callback_sees_every_report() {
        let mut t = Trainer::new(1);
        let mut seen = Vec::new();
        let report = t
            .train_with_progress(&TrainConfig::new(50, 10), |s| seen.push(s.clone()))
            .unwrap();
        assert_eq!(seen, report.history);
    }

    #[test]
    fn invalid_config_is_rejected_before_training() {
        let mut t = Trainer::new(1);
        let before = t.synapse_0().clone();
        assert!(matches!(
            t.train(&TrainConfig::new(10, 0)),
            Err(TrainError::InvalidConfig(_))
        ));
        assert_eq!(t.synapse_0(), &before);
    }

    fn diverging_trainer() -> Trainer {
        let w0 = Matrix::zeros(3, 4);
        let w1 = Matrix::from_data(vec![vec![f64::INFINITY], vec![0.0], vec![0.0], vec![0.0]]);
        Trainer::from_weights(Dataset::xor(), w0, w1).unwrap()
    }

    #[test]
    fn non_finite_weights_halt_by_default() {
        let mut t = diverging_trainer();
        let err = t.train(&TrainConfig::new(5, 1)).unwrap_err();
        assert!(matches!(err, TrainError::NonFiniteWeights { iteration: 0, synapse: 0 }));
    }

    #[test]
    fn halted_update_is_not_committed() {
        let mut t = diverging_trainer();
        let before = t.clone();
        assert!(t.train(&TrainConfig::new(5, 1)).is_err());
        assert_eq!(t.synapse_0(), before.synapse_0());
        assert_eq!(t.synapse_1(), before.synapse_1());
        assert!(t.synapse_0().is_finite());
    }

    #[test]
    fn non_finite_weights_can_be_carried_through() {
        let mut t = diverging_trainer();
        let mut config = TrainConfig::new(5, 1);
        config.halt_on_non_finite = false;
        let report = t.train(&config).unwrap();
        assert_eq!(report.non_finite_at, Some(0));
        assert_eq!(report.updates, 5);
        assert!(t.non_finite_synapse().is_some());
    }
}
