use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::WeightMatrix;
use crate::network::init::init_network;

/// A fully connected sigmoid network: one weight matrix per connection
/// between consecutive layers, input side first.
///
/// A `Network` is a snapshot. Training never edits one in place; every
/// update produces a new value so the previous weights stay available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<WeightMatrix>,
}

impl Network {
    /// Random network, see [`init_network`].
    pub fn initialize<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        hidden_layer_count: usize,
        rng: &mut R,
    ) -> Network {
        Network {
            layers: init_network(input_size, hidden_size, output_size, hidden_layer_count, rng),
        }
    }

    /// Wraps existing matrices, checking that each layer's output width
    /// equals the next layer's input width.
    pub fn from_layers(layers: Vec<WeightMatrix>) -> Result<Network> {
        if layers.is_empty() {
            return Err(Error::InvalidShape("a network needs at least one layer".into()));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_count() != pair[1].input_count() {
                return Err(Error::InvalidShape(format!(
                    "layer {} has {} outputs but layer {} takes {} inputs",
                    i,
                    pair[0].output_count(),
                    i + 1,
                    pair[1].input_count()
                )));
            }
        }
        Ok(Network { layers })
    }

    /// For layers derived shape-for-shape from an existing network.
    pub(crate) fn with_layers(layers: Vec<WeightMatrix>) -> Network {
        debug_assert!(Network::from_layers(layers.clone()).is_ok());
        Network { layers }
    }

    pub fn layers(&self) -> &[WeightMatrix] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> &WeightMatrix {
        &self.layers[index]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_count()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_count()
    }

    /// Sum of squared non-bias weights over every layer.
    pub fn input_weight_square_sum(&self) -> f64 {
        self.layers.iter().map(WeightMatrix::input_weight_square_sum).sum()
    }
}

#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<WeightMatrix>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(raw: RawNetwork) -> Result<Self> {
        Network::from_layers(raw.layers)
    }
}
