pub mod dataset;
pub mod error;
pub mod trainer;
pub mod report_stats;
pub mod train_config;
pub mod loop_fn;

pub use dataset::Dataset;
pub use error::TrainError;
pub use trainer::{Activations, Trainer};
pub use report_stats::{ReportStats, TrainReport};
pub use train_config::{TrainConfig, UpdateMode};
pub use loop_fn::train_loop;
