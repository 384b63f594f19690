//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

/// glass-calc: drive the calculator engine from the terminal
#[derive(Parser, Debug)]
#[command(name = "glass-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Result output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Print every step of the session, not just the final displays
    #[arg(long, global = true)]
    pub trace: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a sequence of keys and print the displays
    Press(PressArgs),

    /// Evaluate a compact key script such as "7+3="
    Eval(EvalArgs),

    /// Read keys from stdin, one line at a time
    Repl(ReplArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Keys to press, in order (e.g. 7 + 3 Enter)
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Vocabulary the keys are written in
    #[arg(long, value_enum, default_value = "keyboard")]
    pub input: InputMode,

    /// Record unknown keys and carry on instead of failing
    #[arg(long)]
    pub skip_unknown: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// One key per character; whitespace is ignored
    #[arg(allow_hyphen_values = true)]
    pub script: String,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Vocabulary the keys are written in
    #[arg(long, value_enum, default_value = "keyboard")]
    pub input: InputMode,
}

/// Which driver interprets key names
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keyboard key names: digits, + - * / %, ".", Enter, Backspace, Escape
    #[default]
    Keyboard,
    /// On-screen button labels: digits, + − × ÷ %, ".", "=", C, AC
    Keypad,
}

/// Result output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Plain text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for crate::config::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Log format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for crate::config::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}
