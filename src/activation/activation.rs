use crate::math::matrix::Matrix;

/// Largest magnitude fed to exp(); inputs are clamped to ±CLAMP first.
/// Values in the normal training range pass through unchanged.
const CLAMP: f64 = 500.0;

/// Logistic sigmoid: 1 / (1 + e^-x), with the argument clamped to avoid
/// overflow in exp().
pub fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-CLAMP, CLAMP);
    1.0 / (1.0 + (-x).exp())
}

/// Applies the sigmoid element-wise.
pub fn sigmoid_matrix(z: &Matrix) -> Matrix {
    z.map(sigmoid)
}

/// Derivative of the sigmoid, computed from its *output*: a ⊙ (1 - a).
///
/// `activations` must hold post-sigmoid values, never raw pre-activations:
/// the a·(1-a) form is only valid for a = sigmoid(z).
pub fn sigmoid_derivative(activations: &Matrix) -> Matrix {
    activations.map(|a| a * (1.0 - a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_stays_strictly_inside_unit_interval() {
        for &x in &[-1e9, -500.0, -30.0, -1.0, 0.0, 1.0, 30.0, 500.0, 1e9] {
            let s = sigmoid(x);
            assert!(s > 0.0 && s < 1.0, "sigmoid({x}) = {s} out of (0, 1)");
        }
    }

    #[test]
    fn sigmoid_is_unaffected_by_clamp_in_normal_range() {
        // For |x| ≤ 500 the clamp is the identity.
        for &x in &[-6.0, -0.5, 0.0, 0.5, 6.0] {
            assert_eq!(sigmoid(x), 1.0 / (1.0 + (-x).exp()));
        }
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn derivative_of_sigmoid_output_is_bounded_by_quarter() {
        let z = Matrix::from_data(vec![vec![-8.0, -1.0, 0.0, 1.0, 8.0]]);
        let a = sigmoid_matrix(&z);
        let d = sigmoid_derivative(&a);
        for &v in &d.data[0] {
            assert!((0.0..=0.25).contains(&v), "derivative {v} out of [0, 0.25]");
        }
        // The maximum 0.25 is attained at z = 0.
        assert!((d.data[0][2] - 0.25).abs() < 1e-15);
    }
}
