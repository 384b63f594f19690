//! glass-calc: pocket calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! glass-calc press 7 + 3 Enter          # 7 + 3 = / 10
//! glass-calc press --input keypad 6 × 7 =
//! glass-calc eval "5/0="                # Error
//! glass-calc --trace eval "9+9+2="      # every step
//! glass-calc --format json repl         # JSON Lines from stdin
//! ```

use clap::Parser;
use glass_calc_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    logging::init(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Press(args) => handlers::run_press(&config, &args, &mut out),
        Commands::Eval(args) => handlers::run_eval(&config, &args, &mut out),
        Commands::Repl(args) => handlers::run_repl(&config, &args, io::stdin().lock(), &mut out),
        Commands::Config => handlers::run_config(&config, &mut out),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_count(cli.verbose)
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_format(cli.format.into())
        .with_log_format(cli.log_format.into())
        .with_trace(cli.trace)
}
