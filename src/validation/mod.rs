pub mod kfold;

pub use kfold::{run_k_fold, KFoldReport};
