use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::{sigmoid_derivative, sigmoid_matrix};
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::params::NetworkParameters;

/// Intermediate values of one forward pass.
///
/// Returned by `Mlp::forward` and threaded back into `Mlp::backward`, which
/// makes the forward → backward data dependency explicit instead of hiding it
/// in model state. A cache is only meaningful for the parameter values it was
/// computed under.
///
/// Fields:
/// - `input`  — the batch fed to the pass, samples × input_size
/// - `z1`     — hidden pre-activations, input·w1 + b1
/// - `a1`     — hidden activations, sigmoid(z1)
/// - `z2`     — output pre-activations, a1·w2 + b2
/// - `output` — network output, sigmoid(z2)
#[derive(Debug, Clone)]
pub struct ForwardCache {
    pub input: Matrix,
    pub z1: Matrix,
    pub a1: Matrix,
    pub z2: Matrix,
    pub output: Matrix,
}

/// Partial derivatives of the batch loss w.r.t. each parameter tensor.
/// Produced by `backward`, consumed (moved out) by the next `update`.
#[derive(Debug, Clone)]
struct Gradients {
    w1: Matrix,
    b1: Matrix,
    w2: Matrix,
    b2: Matrix,
}

/// One-hidden-layer perceptron with sigmoid activations at both layers,
/// trained by full-batch gradient descent on half mean squared error.
#[derive(Debug, Serialize, Deserialize)]
pub struct Mlp {
    params: NetworkParameters,
    initial_params: NetworkParameters,
    #[serde(skip)]
    gradients: Option<Gradients>,
}

impl Mlp {
    /// Builds a network with every weight drawn independently from N(0, 1)
    /// by a generator seeded with `seed`; biases start at zero.
    ///
    /// Draw order is fixed (w1 row-major, then w2 row-major), so equal seeds
    /// and sizes give bit-identical parameters and, with identical inputs
    /// and hyperparameters, bit-identical training trajectories.
    ///
    /// A clone of the freshly initialized parameters is retained and stays
    /// untouched by training; callers can fetch it later for inspection via
    /// `initial_parameters()`.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, seed: u64) -> Mlp {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = NetworkParameters {
            w1: Matrix::standard_normal(input_size, hidden_size, &mut rng),
            b1: Matrix::zeros(1, hidden_size),
            w2: Matrix::standard_normal(hidden_size, output_size, &mut rng),
            b2: Matrix::zeros(1, output_size),
        };
        Mlp {
            initial_params: params.clone(),
            params,
            gradients: None,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Mlp {
        Mlp::new(config.input_size, config.hidden_size, config.output_size, config.seed)
    }

    pub fn input_size(&self) -> usize {
        self.params.w1.rows
    }

    pub fn hidden_size(&self) -> usize {
        self.params.w1.cols
    }

    pub fn output_size(&self) -> usize {
        self.params.w2.cols
    }

    /// The live parameters.
    pub fn parameters(&self) -> &NetworkParameters {
        &self.params
    }

    /// The parameters as they were right after initialization.
    pub fn initial_parameters(&self) -> &NetworkParameters {
        &self.initial_params
    }

    /// Replaces the live parameters wholesale (e.g. with a best-epoch
    /// checkpoint). Any stored gradients belong to the old parameters and are
    /// discarded; `backward` must run again before the next `update`.
    pub fn restore_parameters(&mut self, params: NetworkParameters) {
        self.params = params;
        self.gradients = None;
    }

    /// Forward pass over a batch (one sample per row):
    ///
    ///   z1 = batch·w1 + b1,  a1 = sigmoid(z1)
    ///   z2 = a1·w2 + b2,     output = sigmoid(z2)
    ///
    /// Biases are broadcast-added to every row. The caller guarantees
    /// `batch.cols == input_size()`.
    pub fn forward(&self, batch: &Matrix) -> ForwardCache {
        let z1 = (batch.clone() * self.params.w1.clone()).add_row_vector(&self.params.b1);
        let a1 = sigmoid_matrix(&z1);
        let z2 = (a1.clone() * self.params.w2.clone()).add_row_vector(&self.params.b2);
        let output = sigmoid_matrix(&z2);
        ForwardCache {
            input: batch.clone(),
            z1,
            a1,
            z2,
            output,
        }
    }

    /// Inference-only forward pass; returns just the network output.
    pub fn predict(&self, batch: &Matrix) -> Matrix {
        self.forward(batch).output
    }

    /// Reverse-mode pass: derives the loss gradients for all four parameter
    /// tensors from a forward cache and the true labels, and stores them for
    /// the next `update`.
    ///
    /// For a batch of n samples:
    ///
    ///   delta_out    = (output - expected) ⊙ output·(1 - output)
    ///   grad_w2      = a1ᵗ·delta_out / n          grad_b2 = col_mean(delta_out)
    ///   delta_hidden = (delta_out·w2ᵗ) ⊙ a1·(1 - a1)
    ///   grad_w1      = inputᵗ·delta_hidden / n    grad_b1 = col_mean(delta_hidden)
    ///
    /// The 1/n factor averages the loss per sample, matching `MseLoss`.
    /// Fails with `ShapeMismatch` if `expected` does not match the cached
    /// output's shape.
    pub fn backward(&mut self, cache: &ForwardCache, expected: &Matrix) -> Result<()> {
        if expected.rows != cache.output.rows || expected.cols != cache.output.cols {
            return Err(Error::shape_mismatch(
                "backward",
                (cache.output.rows, cache.output.cols),
                (expected.rows, expected.cols),
            ));
        }

        let n = cache.input.rows as f64;

        // Output layer: dE/da2 = output - expected for the half-squared-error
        // loss, then through the sigmoid to get dE/dz2.
        let output_error = cache.output.clone() - expected.clone();
        let delta_out = output_error.hadamard(&sigmoid_derivative(&cache.output));

        let grad_w2 = (cache.a1.transpose() * delta_out.clone()).scale(1.0 / n);
        let grad_b2 = delta_out.column_mean();

        // Hidden layer: propagate dE/dz2 back through w2, then through the
        // hidden sigmoid.
        let hidden_error = delta_out * self.params.w2.transpose();
        let delta_hidden = hidden_error.hadamard(&sigmoid_derivative(&cache.a1));

        let grad_w1 = (cache.input.transpose() * delta_hidden.clone()).scale(1.0 / n);
        let grad_b1 = delta_hidden.column_mean();

        self.gradients = Some(Gradients {
            w1: grad_w1,
            b1: grad_b1,
            w2: grad_w2,
            b2: grad_b2,
        });
        Ok(())
    }

    /// Gradient-descent step: p := p - learning_rate·grad for each tensor.
    ///
    /// Consumes the stored gradients; fails with `NotReady` if `backward` has
    /// not run since the last update or parameter change. No clipping: a
    /// learning rate large enough to diverge is a caller choice, not an error.
    pub fn update(&mut self, learning_rate: f64) -> Result<()> {
        let grads = self.gradients.take().ok_or(Error::NotReady)?;
        let p = &mut self.params;
        p.w1 = p.w1.clone() - grads.w1.scale(learning_rate);
        p.b1 = p.b1.clone() - grads.b1.scale(learning_rate);
        p.w2 = p.w2.clone() - grads.w2.scale(learning_rate);
        p.b2 = p.b2.clone() - grads.b2.scale(learning_rate);
        Ok(())
    }

    /// Serializes the model (live and initial parameters) to a
    /// pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a model from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Mlp> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::mse::MseLoss;

    fn toy_batch() -> (Matrix, Matrix) {
        let x = Matrix::from_data(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ]);
        let y = Matrix::from_data(vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ]);
        (x, y)
    }

    #[test]
    fn equal_seeds_give_identical_networks_and_outputs() {
        let a = Mlp::new(3, 4, 2, 42);
        let b = Mlp::new(3, 4, 2, 42);
        assert_eq!(a.parameters(), b.parameters());

        let x = Matrix::from_data(vec![vec![0.2, -0.4, 0.9]]);
        assert_eq!(a.predict(&x), b.predict(&x));

        let c = Mlp::new(3, 4, 2, 43);
        assert_ne!(a.parameters(), c.parameters());
    }

    #[test]
    fn biases_start_at_zero_and_shapes_are_right() {
        let net = Mlp::new(5, 3, 2, 1);
        let p = net.parameters();
        assert_eq!((p.w1.rows, p.w1.cols), (5, 3));
        assert_eq!((p.b1.rows, p.b1.cols), (1, 3));
        assert_eq!((p.w2.rows, p.w2.cols), (3, 2));
        assert_eq!((p.b2.rows, p.b2.cols), (1, 2));
        assert!(p.b1.data[0].iter().all(|&b| b == 0.0));
        assert!(p.b2.data[0].iter().all(|&b| b == 0.0));
    }

    #[test]
    fn one_small_step_decreases_batch_error() {
        let (x, y) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 7);

        let before = MseLoss::loss(&y, &net.predict(&x)).unwrap();
        let cache = net.forward(&x);
        net.backward(&cache, &y).unwrap();
        net.update(0.1).unwrap();
        let after = MseLoss::loss(&y, &net.predict(&x)).unwrap();

        assert!(after < before, "loss went {before} -> {after}");
    }

    #[test]
    fn gradients_match_finite_differences() {
        let (x, y) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 11);

        let cache = net.forward(&x);
        net.backward(&cache, &y).unwrap();
        let grads = net.gradients.clone().unwrap();

        let eps = 1e-6;
        // Loss with one entry of one tensor nudged by delta.
        let perturbed_loss = |tensor: usize, delta: f64| -> f64 {
            let mut p = net.params.clone();
            let target = match tensor {
                0 => &mut p.w1,
                1 => &mut p.b1,
                2 => &mut p.w2,
                _ => &mut p.b2,
            };
            target.data[0][0] += delta;
            let mut nudged = Mlp::new(2, 3, 2, 11);
            nudged.restore_parameters(p);
            MseLoss::loss(&y, &nudged.predict(&x)).unwrap()
        };

        // Check one entry per tensor against a central difference of the loss.
        let analytic = [
            grads.w1.data[0][0],
            grads.b1.data[0][0],
            grads.w2.data[0][0],
            grads.b2.data[0][0],
        ];
        for (tensor, &expected) in analytic.iter().enumerate() {
            let numeric = (perturbed_loss(tensor, eps) - perturbed_loss(tensor, -eps)) / (2.0 * eps);
            assert!(
                (expected - numeric).abs() < 1e-7,
                "tensor {tensor}: analytic {expected} vs numeric {numeric}"
            );
        }
    }

    #[test]
    fn backward_rejects_mismatched_labels() {
        let (x, _) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 5);
        let cache = net.forward(&x);
        let bad_labels = Matrix::zeros(4, 3);
        assert!(matches!(
            net.backward(&cache, &bad_labels),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn update_requires_fresh_gradients() {
        let (x, y) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 5);

        // Never ran backward.
        assert_eq!(net.update(0.1), Err(Error::NotReady));

        let cache = net.forward(&x);
        net.backward(&cache, &y).unwrap();
        net.update(0.1).unwrap();
        // Gradients were consumed by the first update.
        assert_eq!(net.update(0.1), Err(Error::NotReady));
    }

    #[test]
    fn restoring_parameters_discards_stale_gradients() {
        let (x, y) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 5);
        let checkpoint = net.parameters().clone();

        let cache = net.forward(&x);
        net.backward(&cache, &y).unwrap();
        net.restore_parameters(checkpoint);
        assert_eq!(net.update(0.1), Err(Error::NotReady));
    }

    #[test]
    fn initial_parameters_survive_training_steps() {
        let (x, y) = toy_batch();
        let mut net = Mlp::new(2, 3, 2, 9);
        let initial = net.initial_parameters().clone();

        let cache = net.forward(&x);
        net.backward(&cache, &y).unwrap();
        net.update(0.5).unwrap();

        assert_eq!(net.initial_parameters(), &initial);
        assert_ne!(net.parameters(), &initial);
    }

    #[test]
    fn json_round_trip_preserves_parameters() {
        let net = Mlp::new(2, 3, 2, 21);
        let json = serde_json::to_string(&net).unwrap();
        let restored: Mlp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.parameters(), net.parameters());
        assert_eq!(restored.initial_parameters(), net.initial_parameters());
    }
}
