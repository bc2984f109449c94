use std::hash::Hash;

use crate::error::{Error, Result};
use crate::labels::codec::LabelCodec;
use crate::network::network::Network;
use crate::propagation::forward::propagate;
use crate::train::report::TrainingReport;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{train, validate_examples};

/// A trained sigmoid network together with the labels it predicts.
///
/// Construction runs the whole training loop; a `Classifier` value always
/// holds trained weights.
#[derive(Debug, Clone)]
pub struct Classifier<L> {
    codec: LabelCodec<L>,
    network: Network,
    report: TrainingReport,
}

impl<L: Clone + Eq + Hash> Classifier<L> {
    /// Trains a classifier on `examples[i] → labels[i]`.
    ///
    /// Fails before training if the examples are empty, ragged, contain
    /// non-finite features, or do not pair up with `labels`, or if `config`
    /// is out of range.
    pub fn new(examples: &[Vec<f64>], labels: &[L], config: TrainConfig) -> Result<Classifier<L>> {
        config.validate()?;
        validate_examples(examples, labels.len())?;

        let codec = LabelCodec::from_labels(labels);
        let indices = codec.encode(labels)?;
        let run = train(examples, &indices, codec.len(), &config)?;

        Ok(Classifier {
            codec,
            network: run.network,
            report: run.report,
        })
    }

    /// Most likely label for `features`.
    pub fn predict(&self, features: &[f64]) -> Result<&L> {
        let index = self.predict_index(features)?;
        self.codec
            .decode(index)
            .ok_or_else(|| Error::InvalidShape(format!("output node {index} has no label")))
    }

    /// Output node index for `features`.
    pub fn predict_index(&self, features: &[f64]) -> Result<usize> {
        if features.len() != self.input_size() {
            return Err(Error::DimensionMismatch {
                expected: self.input_size(),
                actual: features.len(),
            });
        }
        Ok(propagate(&self.network, features).prediction())
    }

    pub fn predict_all(&self, examples: &[Vec<f64>]) -> Result<Vec<&L>> {
        examples.iter().map(|x| self.predict(x)).collect()
    }

    /// Fraction of `examples` predicted as their label. Labels never seen in
    /// training count as misses.
    pub fn accuracy(&self, examples: &[Vec<f64>], labels: &[L]) -> Result<f64> {
        validate_examples(examples, labels.len())?;
        let mut correct = 0usize;
        for (example, label) in examples.iter().zip(labels.iter()) {
            if self.predict(example)? == label {
                correct += 1;
            }
        }
        Ok(correct as f64 / examples.len() as f64)
    }

    pub fn input_size(&self) -> usize {
        self.network.input_size()
    }

    /// Labels in output-node order.
    pub fn labels(&self) -> &[L] {
        self.codec.labels()
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }
}
