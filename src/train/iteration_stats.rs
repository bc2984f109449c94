use serde::{Serialize, Deserialize};

/// Per-iteration training statistics emitted by `train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the trainer
/// sends one `IterationStats` value for every iteration, accepted or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Iteration budget for this run.
    pub max_iterations: usize,
    /// Batch cost of the candidate weights evaluated this iteration.
    pub cost: f64,
    /// Batch cost of the last accepted weights after this iteration.
    pub accepted_cost: f64,
    /// Learning rate after this iteration's schedule adjustment.
    pub learning_rate: f64,
    /// Whether the candidate was accepted.
    pub accepted: bool,
}
