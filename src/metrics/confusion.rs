use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::metrics::accuracy::argmax;

/// Per-class tallies derived from a confusion matrix.
///
/// For class i: `true_positives[i]` is the diagonal entry,
/// `false_negatives[i]` is row i's sum minus the diagonal (class-i samples
/// predicted as something else), and `false_positives[i]` is column i's sum
/// minus the diagonal (other samples predicted as class i).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub true_positives: Vec<usize>,
    pub false_positives: Vec<usize>,
    pub false_negatives: Vec<usize>,
    pub total_samples: usize,
    pub correct_predictions: usize,
}

/// Builds the C×C confusion matrix: entry [i][j] counts samples whose true
/// class is i and predicted class is j.
///
/// The true class is the argmax of the one-hot label row, the predicted
/// class the argmax of the network's output row; in both, the first maximum
/// wins ties.
pub fn confusion_matrix(y_true_one_hot: &Matrix, y_pred: &Matrix) -> Result<Vec<Vec<usize>>> {
    if y_true_one_hot.rows != y_pred.rows || y_true_one_hot.cols != y_pred.cols {
        return Err(Error::shape_mismatch(
            "confusion matrix",
            (y_true_one_hot.rows, y_true_one_hot.cols),
            (y_pred.rows, y_pred.cols),
        ));
    }

    let num_classes = y_true_one_hot.cols;
    let mut matrix = vec![vec![0usize; num_classes]; num_classes];

    for (truth, pred) in y_true_one_hot.data.iter().zip(y_pred.data.iter()) {
        matrix[argmax(truth)][argmax(pred)] += 1;
    }

    Ok(matrix)
}

/// Reduces a confusion matrix to per-class TP/FP/FN counts plus totals.
pub fn classification_summary(confusion: &[Vec<usize>]) -> ClassificationSummary {
    let num_classes = confusion.len();
    let mut true_positives = vec![0usize; num_classes];
    let mut false_positives = vec![0usize; num_classes];
    let mut false_negatives = vec![0usize; num_classes];

    for i in 0..num_classes {
        let tp = confusion[i][i];
        let row_sum: usize = confusion[i].iter().sum();
        let col_sum: usize = confusion.iter().map(|row| row[i]).sum();
        true_positives[i] = tp;
        false_negatives[i] = row_sum - tp;
        false_positives[i] = col_sum - tp;
    }

    let total_samples = confusion.iter().flatten().sum();
    let correct_predictions = true_positives.iter().sum();

    ClassificationSummary {
        true_positives,
        false_positives,
        false_negatives,
        total_samples,
        correct_predictions,
    }
}
