use serde::{Serialize, Deserialize};

/// Architecture and initialization settings for one `Mlp`.
///
/// Fields:
/// - `input_size`  — pixels per sample (e.g. 120 for a 10×12 grid)
/// - `hidden_size` — neurons in the single hidden layer
/// - `output_size` — number of character classes
/// - `seed`        — seed for the weight-initialization generator; equal
///                   seeds and sizes give bit-identical networks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub seed: u64,
}

impl NetworkConfig {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, seed: u64) -> Self {
        NetworkConfig { input_size, hidden_size, output_size, seed }
    }
}
