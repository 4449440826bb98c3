use serde::{Serialize, Deserialize};

/// Outcome of one `train` run.
///
/// `best_val_error` starts from a +infinity sentinel and `best_epoch` from 0;
/// both keep those values if validation error never improved during the run
/// (or if early stopping was disabled). Callers must check for the sentinel
/// rather than expect an error; a run that never improves is a normal,
/// representable outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// Number of epochs actually executed (equals `max_epochs` unless early
    /// stopping triggered).
    pub epochs_run: usize,
    /// Training error per epoch, in epoch order.
    pub train_errors: Vec<f64>,
    /// Validation error per epoch; empty unless early stopping was active.
    pub val_errors: Vec<f64>,
    /// Lowest validation error seen, or +infinity if none was recorded.
    pub best_val_error: f64,
    /// 1-based epoch of the best validation error; 0 if none was recorded.
    pub best_epoch: usize,
}

impl TrainReport {
    pub(crate) fn new() -> Self {
        TrainReport {
            epochs_run: 0,
            train_errors: Vec::new(),
            val_errors: Vec::new(),
            best_val_error: f64::INFINITY,
            best_epoch: 0,
        }
    }

    /// True if at least one validation improvement was recorded.
    pub fn improved(&self) -> bool {
        self.best_epoch > 0
    }
}
