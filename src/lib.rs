pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod metrics;
pub mod network;
pub mod train;
pub mod validation;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use error::{Error, Result};
pub use network::config::NetworkConfig;
pub use network::mlp::{ForwardCache, Mlp};
pub use network::params::NetworkParameters;
pub use loss::mse::MseLoss;
pub use train::epoch_stats::EpochStats;
pub use train::loop_fn::train;
pub use train::report::TrainReport;
pub use train::train_config::TrainConfig;
pub use metrics::accuracy::{accuracy, argmax};
pub use metrics::confusion::{classification_summary, confusion_matrix, ClassificationSummary};
pub use validation::kfold::{run_k_fold, KFoldReport};
