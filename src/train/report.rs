use serde::{Serialize, Deserialize};

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// An accepted step improved the cost by less than the convergence
    /// threshold, or the cost fell below the floor.
    Converged,
    /// The learning rate decayed below `min_learning_rate` after repeated
    /// rejected steps.
    Stalled,
    /// The iteration budget ran out first.
    Exhausted,
}

/// Summary of a finished training run. None of the outcomes is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub outcome: TrainingOutcome,
    /// Iterations consumed, rejected steps included.
    pub iterations: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    /// Batch cost of the initial random weights.
    pub initial_cost: f64,
    /// Batch cost of the final weights.
    pub final_cost: f64,
    pub final_learning_rate: f64,
    /// Accepted batch costs in order, starting with `initial_cost`.
    pub cost_history: Vec<f64>,
    /// Fraction of training examples the final weights classify correctly.
    pub training_accuracy: f64,
}
