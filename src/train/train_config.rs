use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// Hyperparameters for one `train` run.
///
/// # Fields
/// - `learning_rate`           — gradient-descent step factor; must be > 0
/// - `max_epochs`              — upper bound on full-batch passes; must be > 0
/// - `early_stopping_patience` — consecutive non-improving validation epochs
///                               tolerated before stopping; `0` disables early
///                               stopping entirely
/// - `progress_tx`             — optional channel sender; one `EpochStats` is
///                               sent per completed epoch. Reporting is
///                               best-effort: a dropped receiver never affects
///                               the run.
///
/// The config is immutable for the duration of a run and carries no
/// process-wide state; independent runs get independent configs.
pub struct TrainConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub early_stopping_patience: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel.
    pub fn new(learning_rate: f64, max_epochs: usize, early_stopping_patience: usize) -> Self {
        TrainConfig {
            learning_rate,
            max_epochs,
            early_stopping_patience,
            progress_tx: None,
        }
    }
}
