//! A from-scratch feedforward classifier: fully connected sigmoid layers
//! trained with L2-regularized cross-entropy and adaptive-rate batch
//! gradient descent.
//!
//! ```no_run
//! use sigmoid_nn::{Classifier, TrainConfig};
//!
//! # fn main() -> sigmoid_nn::Result<()> {
//! let examples = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let labels = [false, true, true, false];
//! let config = TrainConfig::new(2, 1, 0.0).with_seed(2);
//! let xor = Classifier::new(&examples, &labels, config)?;
//! assert!(*xor.predict(&[0.0, 1.0])?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod math;
pub mod activation;
pub mod labels;
pub mod network;
pub mod propagation;
pub mod loss;
pub mod train;
pub mod classifier;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::WeightMatrix;
pub use labels::codec::LabelCodec;
pub use network::network::Network;
pub use propagation::forward::ForwardPass;
pub use train::{train, train_from, IterationStats, TrainConfig, TrainingOutcome, TrainingReport, TrainingRun};
pub use classifier::Classifier;
