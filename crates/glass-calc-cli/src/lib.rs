//! glass-calc CLI library
//!
//! Command-line front end for the glass-calc engine: press keys, evaluate
//! key scripts or run an interactive session, with text or JSON output.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{
    Cli, Commands, EvalArgs, FormatArg, InputMode, LogFormatArg, PressArgs, ReplArgs,
};
pub use config::{CliConfig, LogFormat, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
