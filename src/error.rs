/// Errors surfaced by the classifier and its building blocks.
///
/// Numeric trouble during training (saturated activations, overshooting
/// steps, budget exhaustion) is never reported here; the trainer absorbs it
/// and records the outcome on its report instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The training data cannot be used (empty, ragged, mismatched labels).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A hyperparameter is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Layer matrices that do not chain into a network.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A feature vector whose width differs from the network's input layer.
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("label was not seen during training")]
    UnknownLabel,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
