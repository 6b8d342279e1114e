#![doc = r#"
ALLSorts input resolution.

Parses the ALLSorts command line, checks the flag combinations that must hold
before a run, and eagerly loads the raw counts matrix and optional
ground-truth labels. The classification pipeline consumes the resulting
[`UserInput`]; it does not live in this crate.

Invocation modes
----------------
An argument list holding only the program name means the tool is being
driven as a library: [`resolve`] returns [`Invocation::Library`] and nothing
is parsed or loaded. Any further argument switches to CLI mode.

```rust,no_run
use allsorts_input::{resolve, Invocation};

fn main() -> allsorts_input::Result<()> {
    let args = ["allsorts", "-s", "counts.csv", "-d", "out/"];
    if let Invocation::Cli(input) = resolve(args)? {
        let samples = input.samples().expect("samples are required on the CLI");
        println!("{} samples x {} genes", samples.n_samples(), samples.n_features());
    }
    Ok(())
}
```

Building a run without a command line
-------------------------------------
```rust,no_run
use allsorts_input::{RunParams, UserInput};

fn main() -> allsorts_input::Result<()> {
    let params = RunParams {
        train: true,
        samples: Some("counts.csv".into()),
        labels: Some("labels.csv".into()),
        cv: 5,
        ..RunParams::default()
    };
    let input = UserInput::from_params(params)?;
    assert_eq!(input.labels().map(|l| l.name.as_str()), Some("labels"));
    Ok(())
}
```

Error handling
--------------
Every fallible call returns [`Result`]. Usage errors from argument parsing,
validation errors and file errors are distinct variants of [`Error`], so an
embedding application decides how to react; only the `allsorts` binary turns
them into exit codes.

```rust
use allsorts_input::{resolve_with_root, Error, ValidationError};
use std::path::Path;

let err = resolve_with_root(["allsorts", "-s", "counts.csv"], Path::new("/opt/allsorts"))
    .unwrap_err();
assert!(matches!(err, Error::Validation(ValidationError::MissingDestination)));
```

Useful modules
--------------
- [`input`]: the resolver and the command-line schema.
- [`io`]: counts and label CSV loaders.
- [`types`]: `SampleMatrix` and `LabelSeries`.
- [`core`](crate::core): `RunParams` and installation paths.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod core;
pub mod error;
pub mod input;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::{DEFAULT_CV, DEFAULT_N_JOBS, RunParams};
pub use crate::core::paths::{ROOT_ENV, default_model_dir, install_root};
pub use error::{Error, Result, ValidationError};
pub use types::{LABELS_NAME, LabelSeries, SampleMatrix};

pub use input::{InputArgs, Invocation, UserInput, is_cli, resolve, resolve_with_root};
pub use io::{load_labels, load_samples};
