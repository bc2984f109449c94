use std::path::Path;
use std::sync::mpsc;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::train::iteration_stats::IterationStats;

/// Hyperparameters for one training run.
///
/// # Fields
/// - `seed`                 : seeds the weight initializer; same seed, same run
/// - `hidden_layer_size`    : nodes in every hidden layer
/// - `hidden_layer_count`   : number of hidden layers
/// - `regularization`       : L2 strength λ; bias weights are never penalized
/// - `max_iterations`       : iteration budget, rejected steps included
/// - `convergence_threshold`: stop once an accepted step improves the cost by less
/// - `cost_floor`           : stop once the cost drops below this
/// - `learning_rate`        : initial step size
/// - `acceleration`         : rate multiplier after a run of accepted steps
/// - `deceleration`         : rate multiplier after a rejected step
/// - `acceleration_patience`: accepted steps in a row before accelerating
/// - `min_learning_rate`    : give up once the rate decays below this
/// - `log_interval`         : iterations between `debug!` progress events
/// - `progress_tx`          : optional channel; one `IterationStats` per
///                            iteration. A dropped receiver is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub seed: u64,
    pub hidden_layer_size: usize,
    pub hidden_layer_count: usize,
    pub regularization: f64,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    pub cost_floor: f64,
    pub learning_rate: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub acceleration_patience: usize,
    pub min_learning_rate: f64,
    pub log_interval: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            seed: 0,
            hidden_layer_size: 4,
            hidden_layer_count: 1,
            regularization: 0.1,
            max_iterations: 20_000,
            convergence_threshold: 1e-12,
            cost_floor: 1e-4,
            learning_rate: 1.0,
            acceleration: 1.05,
            deceleration: 0.5,
            acceleration_patience: 10,
            min_learning_rate: 1e-10,
            log_interval: 1_000,
            progress_tx: None,
        }
    }
}

impl TrainConfig {
    /// Defaults with the three architecture knobs set.
    pub fn new(hidden_layer_size: usize, hidden_layer_count: usize, regularization: f64) -> Self {
        TrainConfig {
            hidden_layer_size,
            hidden_layer_count,
            regularization,
            ..TrainConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hidden_layers(mut self, size: usize, count: usize) -> Self {
        self.hidden_layer_size = size;
        self.hidden_layer_count = count;
        self
    }

    pub fn with_regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Stopping thresholds: minimum per-step improvement and absolute floor.
    pub fn with_convergence(mut self, threshold: f64, cost_floor: f64) -> Self {
        self.convergence_threshold = threshold;
        self.cost_floor = cost_floor;
        self
    }

    /// Learning-rate schedule: growth factor, shrink factor, patience.
    pub fn with_schedule(mut self, acceleration: f64, deceleration: f64, patience: usize) -> Self {
        self.acceleration = acceleration;
        self.deceleration = deceleration;
        self.acceleration_patience = patience;
        self
    }

    pub fn with_min_learning_rate(mut self, min_learning_rate: f64) -> Self {
        self.min_learning_rate = min_learning_rate;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<IterationStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Parses a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<TrainConfig> {
        let config: TrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file, see [`TrainConfig::from_json_str`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-checks every field. A `min_learning_rate` above `learning_rate`
    /// is allowed; such a run stalls on its first rejected step.
    pub fn validate(&self) -> Result<()> {
        if self.hidden_layer_size == 0 {
            return Err(invalid("hidden_layer_size must be at least 1"));
        }
        if self.hidden_layer_count == 0 {
            return Err(invalid("hidden_layer_count must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        if !(self.regularization.is_finite() && self.regularization >= 0.0) {
            return Err(invalid("regularization must be finite and non-negative"));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid("learning_rate must be finite and positive"));
        }
        if !(self.acceleration.is_finite() && self.acceleration >= 1.0) {
            return Err(invalid("acceleration must be at least 1"));
        }
        if !(self.deceleration > 0.0 && self.deceleration < 1.0) {
            return Err(invalid("deceleration must lie in (0, 1)"));
        }
        if !(self.convergence_threshold >= 0.0 && self.cost_floor >= 0.0) {
            return Err(invalid("convergence thresholds must be non-negative"));
        }
        if !(self.min_learning_rate.is_finite() && self.min_learning_rate >= 0.0) {
            return Err(invalid("min_learning_rate must be finite and non-negative"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> Error {
    Error::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TrainConfig::default().validate().unwrap();
    }

    #[test]
    fn new_overrides_architecture_only() {
        let config = TrainConfig::new(2, 1, 0.0);
        assert_eq!(config.hidden_layer_size, 2);
        assert_eq!(config.regularization, 0.0);
        assert_eq!(config.max_iterations, TrainConfig::default().max_iterations);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            TrainConfig::default().with_hidden_layers(0, 1),
            TrainConfig::default().with_hidden_layers(3, 0),
            TrainConfig::default().with_max_iterations(0),
            TrainConfig::default().with_regularization(-1.0),
            TrainConfig::default().with_regularization(f64::NAN),
            TrainConfig::default().with_learning_rate(0.0),
            TrainConfig::default().with_learning_rate(f64::INFINITY),
            TrainConfig::default().with_schedule(0.9, 0.5, 10),
            TrainConfig::default().with_schedule(1.1, 1.0, 10),
            TrainConfig::default().with_schedule(1.1, 0.0, 10),
            TrainConfig::default().with_convergence(-1.0, 0.0),
            TrainConfig::default().with_min_learning_rate(-1.0),
            TrainConfig::default().with_min_learning_rate(f64::NAN),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn rate_below_the_stall_floor_is_still_valid() {
        TrainConfig::default().with_learning_rate(1e-11).validate().unwrap();
        TrainConfig::default().with_min_learning_rate(2.0).validate().unwrap();
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = TrainConfig::from_json_str(r#"{ "hidden_layer_size": 7, "seed": 3 }"#).unwrap();
        assert_eq!(config.hidden_layer_size, 7);
        assert_eq!(config.seed, 3);
        assert_eq!(config.learning_rate, 1.0);
        assert!(config.progress_tx.is_none());
    }

    #[test]
    fn json_is_validated() {
        let err = TrainConfig::from_json_str(r#"{ "deceleration": 2.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(TrainConfig::from_json_str("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn load_json_reads_a_file() {
        let path = std::env::temp_dir().join(format!("sigmoid-nn-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "regularization": 0.0, "max_iterations": 50 }"#).unwrap();
        let config = TrainConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.regularization, 0.0);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TrainConfig::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn round_trips_through_json_without_channel() {
        let (tx, _rx) = mpsc::channel();
        let config = TrainConfig::default().with_seed(9).with_progress(tx);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("progress_tx"));
        let back = TrainConfig::from_json_str(&json).unwrap();
        assert_eq!(back.seed, 9);
    }
}
