use crate::layers::dense::Dense;
use crate::network::spec::NetworkSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Dense>,
}

impl Network {
    /// Builds a freshly initialized network from an architecture description.
    pub fn from_spec(spec: &NetworkSpec) -> Network {
        let layers = spec
            .layers
            .iter()
            .map(|l| Dense::new(l.size, l.fan_in, l.activation))
            .collect();
        Network { layers }
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Probability the event is signal, for a single-sigmoid-output network.
    pub fn predict_proba(&mut self, input: &[f64]) -> f64 {
        self.forward(input)[0]
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> crate::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &Path) -> crate::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_produces_single_probability() {
        let spec = NetworkSpec::shallow(4, 8);
        let mut net = Network::from_spec(&spec);
        let p = net.predict_proba(&[0.1, -0.2, 0.3, 0.0]);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn deep_network_has_six_layers() {
        let net = Network::from_spec(&NetworkSpec::deep(28, 300));
        assert_eq!(net.layers.len(), 6);
        assert_eq!(net.layers[0].weights.rows, 28);
        assert_eq!(net.layers[5].weights.cols, 1);
    }
}
