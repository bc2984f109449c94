use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::loss::cross_entropy::cost_of;
use crate::network::network::Network;
use crate::propagation::backward::propagate_backwards;
use crate::propagation::forward::{propagate_batch, ForwardPass};
use crate::train::iteration_stats::IterationStats;
use crate::train::report::{TrainingOutcome, TrainingReport};
use crate::train::train_config::TrainConfig;

/// Trained weights plus the report describing how training went.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub network: Network,
    pub report: TrainingReport,
}

/// Last accepted weights with the forward passes and cost computed for them.
struct Accepted {
    network: Network,
    passes: Vec<ForwardPass>,
    cost: f64,
}

/// Checks that the batch is non-empty, rectangular, finite, and matches
/// `label_count`. Returns the example width.
pub fn validate_examples(examples: &[Vec<f64>], label_count: usize) -> Result<usize> {
    if examples.is_empty() {
        return Err(Error::InvalidData("training set is empty".into()));
    }
    if examples.len() != label_count {
        return Err(Error::InvalidData(format!(
            "{} examples but {} labels",
            examples.len(),
            label_count
        )));
    }
    let width = examples[0].len();
    if width == 0 {
        return Err(Error::InvalidData("examples have no features".into()));
    }
    for (i, example) in examples.iter().enumerate() {
        if example.len() != width {
            return Err(Error::InvalidData(format!(
                "example {} has {} features, expected {}",
                i,
                example.len(),
                width
            )));
        }
        if example.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidData(format!("example {i} has a non-finite feature")));
        }
    }
    Ok(width)
}

/// Trains a fresh network for `output_size` classes.
///
/// Weights are initialized from `config.seed`; `labels[i]` is the class
/// index of `examples[i]`.
pub fn train(
    examples: &[Vec<f64>],
    labels: &[usize],
    output_size: usize,
    config: &TrainConfig,
) -> Result<TrainingRun> {
    config.validate()?;
    let input_size = validate_examples(examples, labels.len())?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let network = Network::initialize(
        input_size,
        config.hidden_layer_size,
        output_size,
        config.hidden_layer_count,
        &mut rng,
    );
    train_from(network, examples, labels, config)
}

/// Runs the adaptive-rate gradient descent loop starting from `network`.
///
/// Each iteration evaluates one candidate. A candidate whose cost is
/// non-finite or higher than the last accepted cost is thrown away, the rate
/// shrinks, and a new candidate is derived from the last accepted weights.
/// Otherwise the candidate is accepted; a long enough streak of accepted
/// steps grows the rate. The architecture fields of `config` are ignored.
pub fn train_from(
    network: Network,
    examples: &[Vec<f64>],
    labels: &[usize],
    config: &TrainConfig,
) -> Result<TrainingRun> {
    config.validate()?;
    let input_size = validate_examples(examples, labels.len())?;
    if input_size != network.input_size() {
        return Err(Error::DimensionMismatch {
            expected: network.input_size(),
            actual: input_size,
        });
    }
    if let Some(&label) = labels.iter().find(|&&l| l >= network.output_size()) {
        return Err(Error::InvalidData(format!(
            "label index {} but the network has {} outputs",
            label,
            network.output_size()
        )));
    }

    let lambda = config.regularization;
    let passes = propagate_batch(&network, examples);
    let cost = cost_of(&network, &passes, labels, lambda);
    let initial_cost = cost;
    let mut accepted = Accepted { network, passes, cost };

    info!(
        examples = examples.len(),
        layers = accepted.network.layer_count(),
        initial_cost,
        "training started"
    );

    let mut rate = config.learning_rate;
    let mut streak = 0usize;
    let mut iterations = 0usize;
    let mut accepted_steps = 0usize;
    let mut rejected_steps = 0usize;
    let mut cost_history = vec![initial_cost];
    let mut outcome = TrainingOutcome::Exhausted;

    let emit = |iteration: usize, cost: f64, accepted_cost: f64, rate: f64, accepted: bool| {
        if let Some(ref tx) = config.progress_tx {
            // Progress is best effort; a dropped receiver does not stop training.
            let _ = tx.send(IterationStats {
                iteration,
                max_iterations: config.max_iterations,
                cost,
                accepted_cost,
                learning_rate: rate,
                accepted,
            });
        }
    };

    if accepted.cost < config.cost_floor {
        outcome = TrainingOutcome::Converged;
    } else {
        let mut candidate = propagate_backwards(&accepted.network, &accepted.passes, labels, rate, lambda);

        for iteration in 1..=config.max_iterations {
            iterations = iteration;
            let passes = propagate_batch(&candidate, examples);
            let cost = cost_of(&candidate, &passes, labels, lambda);

            if !cost.is_finite() || cost > accepted.cost {
                rejected_steps += 1;
                rate *= config.deceleration;
                streak = 0;
                trace!(iteration, cost, rate, "step rejected");
                emit(iteration, cost, accepted.cost, rate, false);

                if rate < config.min_learning_rate {
                    outcome = TrainingOutcome::Stalled;
                    break;
                }
                candidate = propagate_backwards(&accepted.network, &accepted.passes, labels, rate, lambda);
                continue;
            }

            let improvement = accepted.cost - cost;
            accepted = Accepted { network: candidate, passes, cost };
            accepted_steps += 1;
            cost_history.push(cost);

            if improvement < config.convergence_threshold || cost < config.cost_floor {
                emit(iteration, cost, cost, rate, true);
                outcome = TrainingOutcome::Converged;
                break;
            }

            streak += 1;
            if streak > config.acceleration_patience {
                rate *= config.acceleration;
                streak = 0;
            }
            emit(iteration, cost, cost, rate, true);

            if config.log_interval > 0 && iteration % config.log_interval == 0 {
                debug!(iteration, cost, rate, "training progress");
            }

            candidate = propagate_backwards(&accepted.network, &accepted.passes, labels, rate, lambda);
        }
    }

    let training_accuracy = accuracy(&accepted.passes, labels);
    info!(
        ?outcome,
        iterations,
        final_cost = accepted.cost,
        training_accuracy,
        "training finished"
    );

    let report = TrainingReport {
        outcome,
        iterations,
        accepted_steps,
        rejected_steps,
        initial_cost,
        final_cost: accepted.cost,
        final_learning_rate: rate,
        cost_history,
        training_accuracy,
    };

    Ok(TrainingRun {
        network: accepted.network,
        report,
    })
}

/// Fraction of passes whose prediction equals the label.
fn accuracy(passes: &[ForwardPass], labels: &[usize]) -> f64 {
    let correct = passes
        .iter()
        .zip(labels.iter())
        .filter(|(pass, label)| pass.prediction() == **label)
        .count();
    correct as f64 / passes.len() as f64
}
