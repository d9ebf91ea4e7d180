use synapse_nn::{Trainer, TrainConfig, UpdateMode};

fn main() {
    let iterations = 60_000;
    let report_interval = 10_000;

    for mode in [UpdateMode::Faithful, UpdateMode::Corrected] {
        let config = TrainConfig::new(iterations, report_interval).with_mode(mode);
        let mut trainer = Trainer::from_config(&config);

        println!("== {mode:?} ==");
        let report = trainer
            .train_with_progress(&config, |stats| {
                println!("Iteration {}: error = {:.6}", stats.iteration, stats.mean_abs_error);
            })
            .expect("XOR training diverged");

        println!("{} updates applied", report.updates);
        println!("Output after training");
        println!("{:.4}", report.output);
    }
}
