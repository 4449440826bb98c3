use serde::{Serialize, Deserialize};
use crate::math::matrix::Matrix;

/// The four learnable tensors of a one-hidden-layer perceptron.
///
/// Shapes are fixed at construction and never change afterwards:
/// - `w1` — input → hidden weights, input_size × hidden_size
/// - `b1` — hidden bias row vector, 1 × hidden_size
/// - `w2` — hidden → output weights, hidden_size × output_size
/// - `b2` — output bias row vector, 1 × output_size
///
/// Each model owns its parameters exclusively; snapshots taken during
/// training (best-weights checkpoints) are value clones, never aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParameters {
    pub w1: Matrix,
    pub b1: Matrix,
    pub w2: Matrix,
    pub b2: Matrix,
}
