//! I/O layer for the two input files: the counts matrix (`samples`) and the
//! optional ground-truth labels (`labels`).
pub mod labels;
pub use labels::{load_labels, read_labels};

pub mod samples;
pub use samples::{load_samples, read_samples};
