use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
/// Receivers (a progress bar, a results logger) use this to observe a run
/// without the engine itself doing any console or file output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Full-batch training error, measured before this epoch's weight update.
    pub train_loss: f64,
    /// Validation error, if early stopping is active this run.
    pub val_loss: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
