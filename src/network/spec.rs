use crate::activation::Activation;
use crate::loss::LossType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of units in this layer
/// - `fan_in`     — number of inputs feeding this layer (the previous layer's
///                  size, or the raw feature count for the first layer)
/// - `activation` — activation applied after the linear transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub fan_in: usize,
    pub activation: Activation,
}

/// A fully serializable description of a classifier architecture plus the
/// loss it trains with. Saved beside the weights so a run's configuration
/// survives independently of the trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Loss function to pair with this network during training.
    pub loss: LossType,
}

impl NetworkSpec {
    /// The one-hidden-layer benchmark classifier:
    /// n_features → hidden (Tanh) → 1 (Sigmoid).
    pub fn shallow(n_features: usize, hidden: usize) -> NetworkSpec {
        NetworkSpec {
            name: "shallow".into(),
            layers: vec![
                LayerSpec { size: hidden, fan_in: n_features, activation: Activation::Tanh },
                LayerSpec { size: 1, fan_in: hidden, activation: Activation::Sigmoid },
            ],
            loss: LossType::BinaryCrossEntropy,
        }
    }

    /// The five-hidden-layer benchmark classifier:
    /// n_features → hidden ×5 (ReLU) → 1 (Sigmoid).
    pub fn deep(n_features: usize, hidden: usize) -> NetworkSpec {
        let mut layers = Vec::with_capacity(6);
        let mut fan_in = n_features;
        for _ in 0..5 {
            layers.push(LayerSpec { size: hidden, fan_in, activation: Activation::ReLU });
            fan_in = hidden;
        }
        layers.push(LayerSpec { size: 1, fan_in, activation: Activation::Sigmoid });
        NetworkSpec { name: "deep".into(), layers, loss: LossType::BinaryCrossEntropy }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> crate::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &Path) -> crate::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_spec_has_one_hidden_layer() {
        let spec = NetworkSpec::shallow(28, 300);
        assert_eq!(spec.layers.len(), 2);
        assert_eq!(spec.layers[0].fan_in, 28);
        assert_eq!(spec.layers[0].activation, Activation::Tanh);
        assert_eq!(spec.layers[1].size, 1);
        assert_eq!(spec.layers[1].activation, Activation::Sigmoid);
    }

    #[test]
    fn deep_spec_chains_five_hidden_layers() {
        let spec = NetworkSpec::deep(28, 300);
        assert_eq!(spec.layers.len(), 6);
        assert_eq!(spec.layers[0].fan_in, 28);
        for layer in &spec.layers[1..5] {
            assert_eq!(layer.fan_in, 300);
            assert_eq!(layer.activation, Activation::ReLU);
        }
        assert_eq!(spec.layers[5].size, 1);
    }
}
