pub mod trainer;
pub mod iteration_stats;
pub mod report;
pub mod train_config;

pub use trainer::{train, train_from, validate_examples, TrainingRun};
pub use iteration_stats::IterationStats;
pub use report::{TrainingOutcome, TrainingReport};
pub use train_config::TrainConfig;
