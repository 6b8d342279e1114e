use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::core::params::{DEFAULT_CV, DEFAULT_N_JOBS, RunParams};
use crate::core::paths;

/// Command-line schema. Long options are spelled with a single dash
/// (`-samples`, `-model_dir`); see [`normalize_args`].
#[derive(Parser, Debug)]
#[command(name = "allsorts", version, about = "ALLSorts CLI", args_override_self = true)]
pub struct InputArgs {
    /// Path to samples (rows) x genes (columns) csv file representing a raw
    /// counts matrix. Note: hg19 only supported currently, use other
    /// references at own risk.
    #[arg(short = 's', long = "samples")]
    pub samples: PathBuf,

    /// (Optional) Path to samples true labels. CSV with samples (rows) x
    /// [sample id, label] (cols). This will enable re-labelling mode.
    #[arg(short = 'l', long = "labels")]
    pub labels: Option<String>,

    /// Path to where you want the final report to be saved.
    #[arg(short = 'd', long = "destination")]
    pub destination: Option<String>,

    /// Test will run a simple logistic regression.
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// Train a new model. -labels/-l and -samples/-s must be set.
    #[arg(long = "train")]
    pub train: bool,

    /// Directory for a new model [default: <install root>/models/allsorts/]
    #[arg(long = "model_dir")]
    pub model_dir: Option<String>,

    /// Will set n_jobs for all estimators/transformers.
    #[arg(short = 'j', long = "njobs", default_value_t = DEFAULT_N_JOBS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub njobs: u32,

    /// If training, how many folds in the cross validation?
    #[arg(long = "cv", default_value_t = DEFAULT_CV,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub cv: u32,

    /// Verbose. Print stage progress.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Rebuild comparisons for labelled visualisations.
    #[arg(long = "comparison")]
    pub comparison: bool,

    /// Force. Bypass warnings without user confirmation.
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Include parent meta-subtypes in predictions. Note: this may remove
    /// previously unclassified samples.
    #[arg(short = 'p', long = "parents")]
    pub parents: bool,
}

impl InputArgs {
    /// Parse a full argument list (program name first).
    pub fn try_parse_tokens<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args)?)
    }

    /// Resolve into run parameters; `root` supplies the default model directory.
    pub fn into_params(self, root: &Path) -> RunParams {
        RunParams {
            samples: Some(self.samples),
            labels: non_empty(self.labels),
            model_dir: non_empty(self.model_dir).unwrap_or_else(|| paths::default_model_dir(root)),
            destination: non_empty(self.destination),
            test: self.test,
            train: self.train,
            comparison: self.comparison,
            verbose: self.verbose,
            force: self.force,
            parents: self.parents,
            n_jobs: self.njobs,
            cv: self.cv,
        }
    }
}

/// Rewrite single-dash long options (`-samples`, `-njobs=2`) to the
/// double-dash form clap expects. Short flags, values and everything after a
/// bare `--` pass through untouched.
///
/// Only the single-dash spelling is part of the interface: `--samples` is an
/// unknown argument. A single-dash prefix of exactly one long option is
/// expanded (`-mod` is `-model_dir`); a prefix that also reads as a short
/// option with an attached value (`-dest`: `-d est` or `-destination`), or
/// that fits several long options, is rejected as ambiguous.
pub fn normalize_args<I, T>(args: I) -> Result<Vec<OsString>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = InputArgs::command();
    let longs: Vec<String> = cmd
        .get_arguments()
        .filter_map(|a| a.get_long())
        .map(str::to_string)
        .collect();
    let shorts: Vec<char> = cmd.get_arguments().filter_map(|a| a.get_short()).collect();

    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, token) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || passthrough {
            out.push(token);
            continue;
        }
        if token == "--" {
            passthrough = true;
            out.push(token);
            continue;
        }
        let Some(s) = token.to_str() else {
            out.push(token);
            continue;
        };

        if let Some(rest) = s.strip_prefix("--") {
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            if !matches!(name, "help" | "version") && longs.iter().any(|l| l == name) {
                return Err(cmd.error(
                    ErrorKind::UnknownArgument,
                    format!("unrecognized argument '{s}'; use -{name}"),
                ));
            }
            out.push(token);
            continue;
        }

        let Some(rest) = s.strip_prefix('-').filter(|r| !r.is_empty()) else {
            out.push(token);
            continue;
        };
        let (name, value) = match rest.split_once('=') {
            Some((n, v)) => (n, Some(v)),
            None => (rest, None),
        };
        if longs.iter().any(|l| l == name) {
            out.push(OsString::from(format!("--{rest}")));
            continue;
        }
        if name.chars().count() < 2 {
            out.push(token);
            continue;
        }

        let matches: Vec<&String> = longs.iter().filter(|l| l.starts_with(name)).collect();
        let short_clash = name.chars().next().is_some_and(|c| shorts.contains(&c));
        match matches.as_slice() {
            [] => out.push(token),
            [long] if !short_clash => {
                let expanded = match value {
                    Some(v) => format!("--{long}={v}"),
                    None => format!("--{long}"),
                };
                out.push(OsString::from(expanded));
            }
            candidates => {
                let mut options: Vec<String> = Vec::new();
                if let Some(c) = name.chars().next().filter(|c| shorts.contains(c)) {
                    options.push(format!("-{c}"));
                }
                options.extend(candidates.iter().map(|l| format!("-{l}")));
                return Err(cmd.error(
                    ErrorKind::UnknownArgument,
                    format!(
                        "ambiguous option: -{name} could match {}",
                        options.join(", ")
                    ),
                ));
            }
        }
    }
    Ok(out)
}

fn non_empty<T: Into<PathBuf>>(value: Option<T>) -> Option<PathBuf> {
    let path: Option<PathBuf> = value.map(Into::into);
    path.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<InputArgs, clap::Error> {
        let mut all = vec!["allsorts"];
        all.extend_from_slice(args);
        InputArgs::try_parse_tokens(all)
    }

    #[test]
    fn schema_is_well_formed() {
        InputArgs::command().debug_assert();
    }

    #[test]
    fn single_dash_long_options_are_rewritten() {
        let out =
            normalize_args(["allsorts", "-samples", "x.csv", "-model_dir=m/", "-s", "-j", "2"])
                .unwrap();
        assert_eq!(
            out,
            vec!["allsorts", "--samples", "x.csv", "--model_dir=m/", "-s", "-j", "2"]
        );
    }

    #[test]
    fn tokens_after_terminator_are_kept() {
        let out = normalize_args(["allsorts", "--", "-train", "--samples"]).unwrap();
        assert_eq!(out, vec!["allsorts", "--", "-train", "--samples"]);
    }

    #[rstest]
    #[case::short(&["-s", "x.csv", "-d", "out/", "-j", "4", "-t", "-v", "-f", "-p"])]
    #[case::single_dash_long(&[
        "-samples", "x.csv", "-destination", "out/", "-njobs", "4",
        "-test", "-verbose", "-force", "-parents",
    ])]
    fn aliases_are_equivalent(#[case] args: &[&str]) {
        let a = parse(args).unwrap();
        assert_eq!(a.samples, PathBuf::from("x.csv"));
        assert_eq!(a.destination.as_deref(), Some("out/"));
        assert_eq!(a.njobs, 4);
        assert!(a.test && a.verbose && a.force && a.parents);
        assert!(!a.train && !a.comparison);
    }

    #[test]
    fn long_only_options() {
        let a = parse(&["-s", "x.csv", "-train", "-comparison", "-cv", "5", "-model_dir", "m/"]).unwrap();
        assert!(a.train && a.comparison);
        assert_eq!(a.cv, 5);
        assert_eq!(a.model_dir.as_deref(), Some("m/"));
    }

    #[rstest]
    #[case::missing_samples(&["-d", "out/"], ErrorKind::MissingRequiredArgument)]
    #[case::empty_samples(&["-s", "", "-d", "out/"], ErrorKind::InvalidValue)]
    #[case::unknown_option(&["-s", "x.csv", "-bogus"], ErrorKind::UnknownArgument)]
    #[case::zero_jobs(&["-s", "x.csv", "-j", "0"], ErrorKind::ValueValidation)]
    #[case::text_cv(&["-s", "x.csv", "-cv", "three"], ErrorKind::ValueValidation)]
    #[case::double_dash_long(&["--samples", "x.csv", "--destination", "out/"], ErrorKind::UnknownArgument)]
    #[case::double_dash_flag(&["-s", "x.csv", "-d", "out/", "--train"], ErrorKind::UnknownArgument)]
    #[case::prefix_of_short_and_long(&["-s", "x.csv", "-dest"], ErrorKind::UnknownArgument)]
    #[case::prefix_of_train(&["-s", "x.csv", "-d", "out/", "-tr"], ErrorKind::UnknownArgument)]
    fn usage_errors(#[case] args: &[&str], #[case] kind: ErrorKind) {
        let err = parse(args).unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn ambiguous_prefix_names_the_candidates() {
        let err = parse(&["-s", "x.csv", "-dest", "out/"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("-d"), "{message}");
        assert!(message.contains("-destination"), "{message}");
    }

    #[rstest]
    #[case::model_dir(&["-s", "x.csv", "-mod", "m/"])]
    #[case::model_dir_with_value(&["-s", "x.csv", "-model=m/"])]
    fn unique_prefix_expands_to_long_option(#[case] args: &[&str]) {
        let a = parse(args).unwrap();
        assert_eq!(a.model_dir.as_deref(), Some("m/"));
    }

    #[test]
    fn unique_prefix_of_flag_expands() {
        let a = parse(&["-s", "x.csv", "-comp"]).unwrap();
        assert!(a.comparison);
    }

    #[test]
    fn help_still_works_with_double_dash() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[rstest]
    #[case::short(&["-s", "old.csv", "-d", "out/", "-s", "new.csv"])]
    #[case::long(&["-samples", "old.csv", "-d", "out/", "-samples", "new.csv"])]
    #[case::mixed(&["-s", "old.csv", "-d", "out/", "-samples=new.csv"])]
    fn repeated_option_keeps_last_value(#[case] args: &[&str]) {
        let a = parse(args).unwrap();
        assert_eq!(a.samples, PathBuf::from("new.csv"));
    }

    #[rstest]
    #[case::separate(&["-s", "x.csv", "-d", "out/", "-v", "-v"])]
    #[case::clustered(&["-s", "x.csv", "-d", "out/", "-vv"])]
    #[case::long_and_short(&["-s", "x.csv", "-d", "out/", "-verbose", "-v"])]
    fn repeated_flag_stays_set(#[case] args: &[&str]) {
        let a = parse(args).unwrap();
        assert!(a.verbose);
    }

    #[test]
    fn empty_optional_paths_count_as_unset() {
        let p = parse(&["-s", "x.csv", "-l", "", "-d", "", "-model_dir", ""])
            .unwrap()
            .into_params(Path::new("/opt/allsorts"));
        assert_eq!(p.labels, None);
        assert_eq!(p.destination, None);
        assert_eq!(p.model_dir, paths::default_model_dir(Path::new("/opt/allsorts")));
    }
}
