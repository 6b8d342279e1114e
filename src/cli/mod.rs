//! Command line layer for the `allsorts` binary.
//!
//! Resolution, validation and loading all live in the library
//! (`allsorts_input::input`); this module installs logging, reports the
//! resolved inputs and maps the outcome to a process exit status.
pub mod runner;

pub use runner::run;
