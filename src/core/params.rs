use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::paths;
use crate::error::{Result, ValidationError};

pub const DEFAULT_N_JOBS: u32 = 1;
pub const DEFAULT_CV: u32 = 3;

/// Run parameters before any input file is read. Suitable for config dumps
/// and for building a run programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    /// Samples (rows) x genes (columns) raw counts CSV
    pub samples: Option<PathBuf>,
    /// Headerless `sample id,label` CSV; enables re-labelling mode
    pub labels: Option<PathBuf>,
    pub model_dir: PathBuf,
    /// Where the final report is written
    pub destination: Option<PathBuf>,
    pub test: bool,
    pub train: bool,
    pub comparison: bool,
    pub verbose: bool,
    pub force: bool,
    /// Include parent meta-subtypes in predictions
    pub parents: bool,
    pub n_jobs: u32,
    /// Cross-validation folds when training
    pub cv: u32,
}

impl RunParams {
    /// Defaults with `model_dir` under the given installation root.
    pub fn with_root(root: &Path) -> Self {
        Self {
            samples: None,
            labels: None,
            model_dir: paths::default_model_dir(root),
            destination: None,
            test: false,
            train: false,
            comparison: false,
            verbose: false,
            force: false,
            parents: false,
            n_jobs: DEFAULT_N_JOBS,
            cv: DEFAULT_CV,
        }
    }

    pub fn samples_path(&self) -> Option<&Path> {
        set(&self.samples)
    }

    pub fn labels_path(&self) -> Option<&Path> {
        set(&self.labels)
    }

    pub fn destination(&self) -> Option<&Path> {
        set(&self.destination)
    }

    /// Check the flag combinations that must hold before loading.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.train && (self.labels_path().is_none() || self.samples_path().is_none()) {
            return Err(ValidationError::TrainingInputs);
        }
        if !self.train && self.destination().is_none() {
            return Err(ValidationError::MissingDestination);
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RunParams {
    fn default() -> Self {
        Self::with_root(&paths::install_root())
    }
}

// An empty path counts as not provided
fn set(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}
