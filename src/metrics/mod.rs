pub mod accuracy;
pub mod confusion;

pub use accuracy::{accuracy, argmax};
pub use confusion::{classification_summary, confusion_matrix, ClassificationSummary};
