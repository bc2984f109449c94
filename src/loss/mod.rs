pub mod cross_entropy;

pub use cross_entropy::{batch_cost, cost_of, example_cost, regularization_penalty, ACTIVATION_EPSILON};
