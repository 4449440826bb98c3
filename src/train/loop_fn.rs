use std::time::Instant;

use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::mlp::Mlp;
use crate::network::params::NetworkParameters;
use crate::train::epoch_stats::EpochStats;
use crate::train::report::TrainReport;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` with full-batch gradient descent and returns a
/// `TrainReport` with the error histories and early-stopping bookkeeping.
///
/// # Arguments
/// - `model`      — mutable reference to the network; trained in place
/// - `x_train`    — training inputs, samples × input_size
/// - `y_train`    — one-hot training labels, samples × output_size
/// - `validation` — optional `(inputs, labels)` pair held out for early
///                  stopping; ignored unless `config.early_stopping_patience`
///                  is > 0
/// - `config`     — hyperparameters plus an optional progress channel
///
/// # Early stopping
/// Active iff validation data is present **and** patience > 0. The epoch
/// whose validation error is strictly lower than every earlier one (ties
/// favor the earlier epoch) has its parameters checkpointed by value; when
/// the error then fails to improve for `patience` consecutive epochs, the
/// loop stops and the checkpoint is restored into the live model. If the
/// loop instead exhausts `max_epochs`, the checkpoint (when one exists) is
/// restored as well. If validation error never improved over the +infinity
/// sentinel (possible when it is NaN from the first epoch on), there is no
/// checkpoint and the last epoch's parameters are deliberately kept as-is;
/// the report then carries `best_epoch == 0` and an infinite
/// `best_val_error` for the caller to inspect.
///
/// Each epoch depends on the full result of the previous one; the loop is
/// strictly sequential.
///
/// # Errors
/// `ShapeMismatch` if `x_train` and `y_train` disagree on row count (label
/// and validation shape checks surface from the model and loss the same way).
///
/// # Panics
/// Panics if `learning_rate` or `max_epochs` is not positive.
pub fn train(
    model: &mut Mlp,
    x_train: &Matrix,
    y_train: &Matrix,
    validation: Option<(&Matrix, &Matrix)>,
    config: &TrainConfig,
) -> Result<TrainReport> {
    assert!(config.learning_rate > 0.0, "learning_rate must be positive");
    assert!(config.max_epochs > 0, "max_epochs must be at least 1");

    if x_train.rows != y_train.rows {
        return Err(Error::shape_mismatch(
            "train",
            (x_train.rows, y_train.cols),
            (y_train.rows, y_train.cols),
        ));
    }

    // Early stopping needs both held-out data and a positive patience.
    let validation = if config.early_stopping_patience > 0 { validation } else { None };
    let early_stopping = validation.is_some();

    let mut report = TrainReport::new();
    let mut best_snapshot: Option<NetworkParameters> = None;
    let mut patience_counter = 0usize;

    for epoch in 1..=config.max_epochs {
        let t_start = Instant::now();

        // ── Full-batch pass: error, gradients, weight update ───────────────
        let cache = model.forward(x_train);
        let train_error = MseLoss::loss(y_train, &cache.output)?;
        report.train_errors.push(train_error);

        model.backward(&cache, y_train)?;
        model.update(config.learning_rate)?;

        // ── Validation and best-checkpoint tracking ────────────────────────
        let mut val_error = None;
        if let Some((x_val, y_val)) = validation {
            let error = MseLoss::loss(y_val, &model.predict(x_val))?;
            report.val_errors.push(error);
            val_error = Some(error);

            if error < report.best_val_error {
                report.best_val_error = error;
                report.best_epoch = epoch;
                patience_counter = 0;
                best_snapshot = Some(model.parameters().clone());
            } else {
                patience_counter += 1;
            }
        }

        emit_stats(config, EpochStats {
            epoch,
            total_epochs: config.max_epochs,
            train_loss: train_error,
            val_loss: val_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        });

        if early_stopping && patience_counter >= config.early_stopping_patience {
            if let Some(best) = best_snapshot.take() {
                model.restore_parameters(best);
            }
            report.epochs_run = epoch;
            return Ok(report);
        }
    }

    // Ran out of epochs. When early stopping was armed and ever recorded an
    // improvement, hand back the best checkpoint rather than the final state.
    if early_stopping {
        if let Some(best) = best_snapshot.take() {
            model.restore_parameters(best);
        }
    }
    report.epochs_run = config.max_epochs;
    Ok(report)
}

/// Best-effort send; a dropped receiver only disables reporting.
fn emit_stats(config: &TrainConfig, stats: EpochStats) {
    if let Some(ref tx) = config.progress_tx {
        let _ = tx.send(stats);
    }
}
