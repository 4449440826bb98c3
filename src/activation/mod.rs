pub mod activation;

pub use activation::{sigmoid, sigmoid_derivative, sigmoid_matrix};
