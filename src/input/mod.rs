//! Input resolution: decide whether the process was invoked from the command
//! line, parse and validate the arguments, then eagerly load the counts
//! matrix and optional labels.
//!
//! The argument list is always an explicit parameter, so resolution is
//! deterministic and testable without touching the real process arguments.
//! Validation failures come back as [`crate::Error::Validation`]; mapping any error
//! to an exit status is left to the binary.
pub mod args;

use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, info};

use crate::core::params::RunParams;
use crate::core::paths;
use crate::error::Result;
use crate::io::{load_labels, load_samples};
use crate::types::{LabelSeries, SampleMatrix};

pub use args::{InputArgs, normalize_args};

/// How the process was invoked.
#[derive(Debug)]
pub enum Invocation {
    /// No arguments beyond the program name; nothing was parsed or loaded.
    Library,
    Cli(UserInput),
}

impl Invocation {
    pub fn is_cli(&self) -> bool {
        matches!(self, Invocation::Cli(_))
    }

    pub fn input(&self) -> Option<&UserInput> {
        match self {
            Invocation::Library => None,
            Invocation::Cli(input) => Some(input),
        }
    }

    pub fn into_input(self) -> Option<UserInput> {
        match self {
            Invocation::Library => None,
            Invocation::Cli(input) => Some(input),
        }
    }
}

/// Validated run configuration with its input files loaded.
#[derive(Debug, Clone)]
pub struct UserInput {
    params: RunParams,
    samples: Option<SampleMatrix>,
    labels: Option<LabelSeries>,
}

impl UserInput {
    /// Validate `params` and load the files they reference.
    ///
    /// Nothing is read from disk unless validation passes.
    pub fn from_params(params: RunParams) -> Result<Self> {
        params.validate()?;

        let samples = params.samples_path().map(load_samples).transpose()?;
        let labels = params.labels_path().map(load_labels).transpose()?;

        if let Some(m) = &samples {
            info!(
                "Samples: {} x {} counts matrix",
                m.n_samples(),
                m.n_features()
            );
        }
        if let Some(l) = &labels {
            info!("Labels: {} samples, {} classes", l.len(), l.classes().len());
        }

        Ok(Self {
            params,
            samples,
            labels,
        })
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn samples(&self) -> Option<&SampleMatrix> {
        self.samples.as_ref()
    }

    pub fn labels(&self) -> Option<&LabelSeries> {
        self.labels.as_ref()
    }

    pub fn model_dir(&self) -> &Path {
        &self.params.model_dir
    }

    pub fn destination(&self) -> Option<&Path> {
        self.params.destination()
    }

    pub fn test(&self) -> bool {
        self.params.test
    }

    pub fn train(&self) -> bool {
        self.params.train
    }

    pub fn comparison(&self) -> bool {
        self.params.comparison
    }

    pub fn verbose(&self) -> bool {
        self.params.verbose
    }

    pub fn force(&self) -> bool {
        self.params.force
    }

    pub fn parents(&self) -> bool {
        self.params.parents
    }

    pub fn n_jobs(&self) -> u32 {
        self.params.n_jobs
    }

    pub fn cv(&self) -> u32 {
        self.params.cv
    }
}

/// True when anything beyond the program name was supplied.
pub fn is_cli(args: &[OsString]) -> bool {
    args.len() > 1
}

/// Resolve an argument list (program name first) using the installed root
/// for the default model directory.
pub fn resolve<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    resolve_with_root(args, &paths::install_root())
}

/// Resolve an argument list against an explicit installation root.
///
/// Usage errors surface as [`crate::Error::Usage`] before validation; validation
/// errors surface before any file is opened.
pub fn resolve_with_root<I, T>(args: I, root: &Path) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if !is_cli(&args) {
        debug!("No command-line arguments; library mode");
        return Ok(Invocation::Library);
    }

    let params = InputArgs::try_parse_tokens(args)?.into_params(root);
    debug!("Resolved parameters: {:?}", params);

    UserInput::from_params(params).map(Invocation::Cli)
}
