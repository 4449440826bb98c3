use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Batch mean squared error: 0.5 · Σ(expected - predicted)² / rows.
    ///
    /// The divisor is the sample count (row count), not rows × cols: the loss
    /// is averaged per sample, never per output unit. Changing this would
    /// silently rescale the effective learning rate.
    pub fn loss(expected: &Matrix, predicted: &Matrix) -> Result<f64> {
        if expected.rows != predicted.rows || expected.cols != predicted.cols {
            return Err(Error::shape_mismatch(
                "mean squared error",
                (expected.rows, expected.cols),
                (predicted.rows, predicted.cols),
            ));
        }
        let squared_sum = (expected.clone() - predicted.clone()).map(|e| e * e).element_sum();
        Ok(0.5 * squared_sum / expected.rows as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_matches_hand_computation() {
        let expected = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let predicted = Matrix::from_data(vec![vec![0.5, 0.5], vec![0.0, 1.0]]);
        // 0.5 * (0.25 + 0.25) / 2 rows = 0.125
        let loss = MseLoss::loss(&expected, &predicted).unwrap();
        assert!((loss - 0.125).abs() < 1e-12);
    }

    #[test]
    fn loss_is_zero_for_identical_matrices() {
        let m = Matrix::from_data(vec![vec![0.3, 0.7]]);
        assert_eq!(MseLoss::loss(&m, &m).unwrap(), 0.0);
    }

    #[test]
    fn loss_divides_by_rows_only() {
        // One row, three columns, unit error in each column: 0.5 * 3 / 1 = 1.5,
        // not 0.5 (which a rows×cols divisor would give).
        let expected = Matrix::from_data(vec![vec![1.0, 1.0, 1.0]]);
        let predicted = Matrix::zeros(1, 3);
        assert!((MseLoss::loss(&expected, &predicted).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn loss_rejects_mismatched_shapes() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        assert!(matches!(
            MseLoss::loss(&a, &b),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
