use std::ffi::OsString;
use std::process::ExitCode;

use clap::CommandFactory;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use allsorts_input::{Error, InputArgs, Invocation, UserInput, resolve};

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        debug!("Tracing subscriber already installed");
    }
}

fn report(input: &UserInput) -> Result<(), Error> {
    info!(
        "Mode: {}",
        if input.train() { "train" } else { "predict" }
    );
    if input.verbose() {
        debug!("Run parameters:\n{}", input.params().to_json()?);
    }

    let samples = input
        .samples()
        .map(|m| format!("{} samples x {} genes", m.n_samples(), m.n_features()))
        .unwrap_or_else(|| "none".to_string());
    let labels = input
        .labels()
        .map(|l| format!("{} labels", l.len()))
        .unwrap_or_else(|| "none".to_string());
    println!("samples: {samples}");
    println!("labels: {labels}");
    println!("model_dir: {}", input.model_dir().display());
    if let Some(dest) = input.destination() {
        println!("destination: {}", dest.display());
    }
    Ok(())
}

pub fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
{
    ExitCode::from(exit_status(args))
}

/// 0 on success, help, version and library mode; 2 on usage errors; 1 otherwise.
fn exit_status<I>(args: I) -> u8
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();

    // Logging has to be up before files are loaded, so peek at -verbose first
    let verbose = matches!(InputArgs::try_parse_tokens(args.iter().cloned()), Ok(a) if a.verbose);
    init_logging(verbose);

    let outcome = resolve(args).and_then(|invocation| match invocation {
        Invocation::Library => {
            info!("No command-line arguments supplied");
            if let Err(e) = InputArgs::command().print_help() {
                warn!("Failed to print usage: {e}");
            }
            Ok(())
        }
        Invocation::Cli(input) => report(&input),
    });

    match outcome {
        Ok(()) => 0,
        Err(Error::Usage(e)) => {
            if let Err(io) = e.print() {
                warn!("Failed to print usage error: {io}");
            }
            e.exit_code() as u8
        }
        Err(e) => {
            eprintln!("{e}");
            e.exit_code() as u8
        }
    }
}
