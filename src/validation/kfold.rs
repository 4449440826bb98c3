use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::metrics::accuracy::accuracy;
use crate::network::config::NetworkConfig;
use crate::network::mlp::Mlp;
use crate::train::loop_fn::train;
use crate::train::train_config::TrainConfig;

/// Per-fold results of one k-fold cross-validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KFoldReport {
    /// Validation accuracy (0–100) of each fold, in fold order.
    pub fold_accuracies: Vec<f64>,
    /// Training error of each fold's last epoch.
    pub fold_final_train_errors: Vec<f64>,
}

impl KFoldReport {
    pub fn mean_accuracy(&self) -> f64 {
        if self.fold_accuracies.is_empty() {
            return 0.0;
        }
        self.fold_accuracies.iter().sum::<f64>() / self.fold_accuracies.len() as f64
    }
}

/// Splits [0, samples) into k contiguous [start, end) ranges.
///
/// Every range has `samples / k` rows; the first `samples % k` ranges take
/// one extra row each, so the ranges cover the full index span exactly once
/// with no gaps or overlaps.
fn fold_bounds(samples: usize, k: usize) -> Vec<(usize, usize)> {
    let base = samples / k;
    let remainder = samples % k;
    let mut bounds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = base + usize::from(fold < remainder);
        bounds.push((start, start + size));
        start += size;
    }
    bounds
}

/// k-fold cross-validation over a combined dataset.
///
/// Each fold in turn becomes the validation slice; the rows before and after
/// it (stacked vertically, original order preserved) train a brand-new
/// network seeded with `net.seed + fold_index`, so folds are reproducible
/// yet start from distinct weights. Folds share no state and each fold
/// trains for the full `config.max_epochs` with early stopping disabled,
/// then is scored by argmax accuracy on its validation slice.
///
/// # Errors
/// - `InvalidPartition` if `k` is 0 or exceeds the sample count (checked
///   before any training starts)
/// - `ShapeMismatch` if `x` and `y` disagree on row count
pub fn run_k_fold(
    x: &Matrix,
    y: &Matrix,
    k: usize,
    net: &NetworkConfig,
    config: &TrainConfig,
) -> Result<KFoldReport> {
    if x.rows != y.rows {
        return Err(Error::shape_mismatch(
            "k-fold split",
            (x.rows, y.cols),
            (y.rows, y.cols),
        ));
    }
    if k == 0 || k > x.rows {
        return Err(Error::InvalidPartition { k, samples: x.rows });
    }

    let samples = x.rows;
    let mut report = KFoldReport {
        fold_accuracies: Vec::with_capacity(k),
        fold_final_train_errors: Vec::with_capacity(k),
    };

    for (fold, (start, end)) in fold_bounds(samples, k).into_iter().enumerate() {
        let x_val = x.row_slice(start, end);
        let y_val = y.row_slice(start, end);

        let x_fit = Matrix::vstack(&x.row_slice(0, start), &x.row_slice(end, samples));
        let y_fit = Matrix::vstack(&y.row_slice(0, start), &y.row_slice(end, samples));

        let mut model = Mlp::new(
            net.input_size,
            net.hidden_size,
            net.output_size,
            net.seed + fold as u64,
        );

        // Fixed-epoch training per fold; patience stays off regardless of
        // what the caller's config says.
        let fold_config = TrainConfig::new(config.learning_rate, config.max_epochs, 0);
        let fold_report = train(&mut model, &x_fit, &y_fit, None, &fold_config)?;
        report.fold_final_train_errors.push(
            fold_report.train_errors.last().copied().unwrap_or(f64::NAN),
        );

        let predictions = model.predict(&x_val);
        report.fold_accuracies.push(accuracy(&y_val, &predictions)?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventeen_samples_in_five_folds_split_4_4_3_3_3() {
        let bounds = fold_bounds(17, 5);
        let sizes: Vec<usize> = bounds.iter().map(|(s, e)| e - s).collect();
        assert_eq!(sizes, vec![4, 4, 3, 3, 3]);

        // Contiguous and exhaustive: each range starts where the previous
        // ended, covering [0, 17) exactly once.
        let mut cursor = 0;
        for (start, end) in bounds {
            assert_eq!(start, cursor);
            cursor = end;
        }
        assert_eq!(cursor, 17);
    }

    #[test]
    fn even_splits_have_uniform_folds() {
        let bounds = fold_bounds(10, 5);
        assert!(bounds.iter().all(|(s, e)| e - s == 2));
        assert_eq!(bounds.last(), Some(&(8, 10)));
    }

    fn toy_dataset() -> (Matrix, Matrix) {
        // Two well-separated clusters, alternating so every fold sees both.
        let x = Matrix::from_data(vec![
            vec![0.0, 0.1],
            vec![1.0, 0.9],
            vec![0.1, 0.0],
            vec![0.9, 1.0],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ]);
        let y = Matrix::from_data(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ]);
        (x, y)
    }

    #[test]
    fn every_fold_is_trained_and_scored() {
        let (x, y) = toy_dataset();
        let net = NetworkConfig::new(2, 3, 2, 42);
        let config = TrainConfig::new(0.5, 150, 0);

        let report = run_k_fold(&x, &y, 3, &net, &config).unwrap();

        assert_eq!(report.fold_accuracies.len(), 3);
        assert_eq!(report.fold_final_train_errors.len(), 3);
        for &acc in &report.fold_accuracies {
            assert!((0.0..=100.0).contains(&acc));
        }
        for &err in &report.fold_final_train_errors {
            assert!(err.is_finite() && err >= 0.0);
        }
        let mean = report.mean_accuracy();
        assert!((0.0..=100.0).contains(&mean));
    }

    #[test]
    fn runs_are_reproducible_for_a_fixed_base_seed() {
        let (x, y) = toy_dataset();
        let net = NetworkConfig::new(2, 3, 2, 7);
        let config = TrainConfig::new(0.5, 50, 0);

        let a = run_k_fold(&x, &y, 3, &net, &config).unwrap();
        let b = run_k_fold(&x, &y, 3, &net, &config).unwrap();
        assert_eq!(a.fold_accuracies, b.fold_accuracies);
        assert_eq!(a.fold_final_train_errors, b.fold_final_train_errors);
    }

    #[test]
    fn more_folds_than_samples_is_an_invalid_partition() {
        let (x, y) = toy_dataset();
        let net = NetworkConfig::new(2, 3, 2, 1);
        let config = TrainConfig::new(0.1, 10, 0);

        assert_eq!(
            run_k_fold(&x, &y, 7, &net, &config),
            Err(Error::InvalidPartition { k: 7, samples: 6 })
        );
        assert_eq!(
            run_k_fold(&x, &y, 0, &net, &config),
            Err(Error::InvalidPartition { k: 0, samples: 6 })
        );
    }

    #[test]
    fn mismatched_rows_are_rejected_before_training() {
        let x = Matrix::zeros(6, 2);
        let y = Matrix::zeros(5, 2);
        let net = NetworkConfig::new(2, 3, 2, 1);
        let config = TrainConfig::new(0.1, 10, 0);

        assert!(matches!(
            run_k_fold(&x, &y, 2, &net, &config),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
