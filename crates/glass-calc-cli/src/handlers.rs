//! Subcommand handlers
//!
//! Each handler writes results to the given writer so tests can capture
//! them; logging goes to stderr through `tracing`.

use std::io::{BufRead, Write};

use glass_calc::core::state::{CalculatorState, Phase};
use glass_calc::prelude::{
    script, CalcError, CalculatorDriver, KeyboardDriver, KeypadDriver, Recorder,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::{EvalArgs, InputMode, PressArgs, ReplArgs};
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// The two display fields after a session, as written in JSON mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Displays<'a> {
    /// Entry line
    pub display: &'a str,
    /// Operation trace
    pub previous_display: &'a str,
    /// Phase of the machine
    pub phase: Phase,
}

impl<'a> Displays<'a> {
    /// Borrows the display fields of `state`
    #[must_use]
    pub fn of(state: &'a CalculatorState) -> Self {
        Self {
            display: state.display(),
            previous_display: state.previous_display(),
            phase: state.phase(),
        }
    }
}

/// Runs the press command
pub fn run_press<W: Write>(config: &CliConfig, args: &PressArgs, out: &mut W) -> CliResult<()> {
    info!(keys = args.keys.len(), input = ?args.input, "pressing keys");
    match args.input {
        InputMode::Keyboard => {
            press_session(config, KeyboardDriver::new(), &args.keys, args.skip_unknown, out)
        }
        InputMode::Keypad => {
            press_session(config, KeypadDriver::new(), &args.keys, args.skip_unknown, out)
        }
    }
}

/// Runs the eval command
pub fn run_eval<W: Write>(config: &CliConfig, args: &EvalArgs, out: &mut W) -> CliResult<()> {
    let events = script(&args.script)?;
    info!(events = events.len(), "evaluating script");

    let mut recorder = Recorder::new(KeyboardDriver::new());
    recorder.submit_all(&events)?;
    write_session(config, &recorder, out)
}

/// Runs the repl command, one line of keys at a time until EOF or `quit`
pub fn run_repl<R: BufRead, W: Write>(
    config: &CliConfig,
    args: &ReplArgs,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    match args.input {
        InputMode::Keyboard => repl_session(config, KeyboardDriver::new(), input, out),
        InputMode::Keypad => repl_session(config, KeypadDriver::new(), input, out),
    }
}

/// Runs the config command
pub fn run_config<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}

fn press_session<D: CalculatorDriver, W: Write>(
    config: &CliConfig,
    driver: D,
    keys: &[String],
    skip_unknown: bool,
    out: &mut W,
) -> CliResult<()> {
    let mut recorder = Recorder::new(driver);
    press_keys(&mut recorder, keys, skip_unknown)?;
    write_session(config, &recorder, out)
}

fn repl_session<D: CalculatorDriver, R: BufRead, W: Write>(
    config: &CliConfig,
    driver: D,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let mut recorder = Recorder::new(driver);
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            debug!("repl closed by user");
            break;
        }
        if line.is_empty() {
            continue;
        }

        let keys: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        press_keys(&mut recorder, &keys, true)?;
        write_line(config, recorder.state(), out)?;
    }

    if config.show_trace {
        write_transcript(config, &recorder, out)?;
    }
    Ok(())
}

fn press_keys<D: CalculatorDriver>(
    recorder: &mut Recorder<D>,
    keys: &[String],
    skip_unknown: bool,
) -> CliResult<()> {
    for key in keys {
        match recorder.press(key) {
            Ok(_) => {}
            Err(CalcError::UnknownKey(key)) if skip_unknown => {
                warn!(key = %key, "skipping unknown key");
            }
            Err(CalcError::UnknownKey(key)) => {
                return Err(CliError::invalid_argument(format!(
                    "unknown key {key:?} (pass --skip-unknown to ignore it)"
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn write_session<D: CalculatorDriver, W: Write>(
    config: &CliConfig,
    recorder: &Recorder<D>,
    out: &mut W,
) -> CliResult<()> {
    if config.show_trace {
        return write_transcript(config, recorder, out);
    }

    let state = recorder.state();
    match config.format {
        OutputFormat::Text => {
            if !state.previous_display().is_empty() {
                writeln!(out, "{}", state.previous_display())?;
            }
            writeln!(out, "{}", state.display())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&Displays::of(state))?)?;
        }
    }
    Ok(())
}

fn write_transcript<D: CalculatorDriver, W: Write>(
    config: &CliConfig,
    recorder: &Recorder<D>,
    out: &mut W,
) -> CliResult<()> {
    let transcript = recorder.transcript();
    match config.format {
        OutputFormat::Text => write!(out, "{}", transcript.render_text())?,
        OutputFormat::Json => writeln!(out, "{}", transcript.to_json()?)?,
    }
    Ok(())
}

/// One line per repl input; JSON mode emits JSON Lines
fn write_line<W: Write>(config: &CliConfig, state: &CalculatorState, out: &mut W) -> CliResult<()> {
    match config.format {
        OutputFormat::Text if state.previous_display().is_empty() => {
            writeln!(out, "{}", state.display())?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}  [{}]", state.display(), state.previous_display())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(&Displays::of(state))?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    fn press(
        config: &CliConfig,
        input: InputMode,
        pressed: &[&str],
        skip_unknown: bool,
    ) -> CliResult<String> {
        let args = PressArgs {
            keys: keys(pressed),
            input,
            skip_unknown,
        };
        let mut out = Vec::new();
        run_press(config, &args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn repl(config: &CliConfig, input: InputMode, lines: &str) -> String {
        let mut out = Vec::new();
        run_repl(config, &ReplArgs { input }, lines.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ===== press tests =====

    #[test]
    fn test_press_keyboard_text() {
        let out = press(&CliConfig::new(), InputMode::Keyboard, &["7", "+", "3", "Enter"], false)
            .unwrap();
        assert_eq!(out, "7 + 3 =\n10\n");
    }

    #[test]
    fn test_press_keypad_text() {
        let out = press(&CliConfig::new(), InputMode::Keypad, &["6", "×", "7", "="], false).unwrap();
        assert_eq!(out, "6 × 7 =\n42\n");
    }

    #[test]
    fn test_press_identity_has_no_trace_line() {
        let out = press(&CliConfig::new(), InputMode::Keyboard, &["Escape"], false).unwrap();
        assert_eq!(out, "0\n");
    }

    #[test]
    fn test_press_unknown_key_fails() {
        let err = press(&CliConfig::new(), InputMode::Keyboard, &["7", "Tab"], false).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
        assert!(err.to_string().contains("\"Tab\""));
    }

    #[test]
    fn test_press_skip_unknown() {
        let out = press(&CliConfig::new(), InputMode::Keyboard, &["7", "Tab", "8"], true).unwrap();
        assert_eq!(out, "78\n");
    }

    #[test]
    fn test_press_json() {
        let config = CliConfig::new().with_format(OutputFormat::Json);
        let out = press(&config, InputMode::Keyboard, &["5", "/", "0", "Enter"], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["display"], "Error");
        assert_eq!(value["previous_display"], "");
        assert_eq!(value["phase"], "error");
    }

    #[test]
    fn test_press_trace_text() {
        let config = CliConfig::new().with_trace(true);
        let out = press(&config, InputMode::Keyboard, &["9", "+", "9", "+"], false).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().last().unwrap().contains("9 + 9 = | 18"));
    }

    #[test]
    fn test_press_trace_json() {
        let config = CliConfig::new()
            .with_format(OutputFormat::Json)
            .with_trace(true);
        let out = press(&config, InputMode::Keyboard, &["1", "Tab"], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let steps = value["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[1]["event"].is_null());
    }

    // ===== eval tests =====

    #[test]
    fn test_eval_script() {
        let mut out = Vec::new();
        let args = EvalArgs {
            script: "3-8=".into(),
        };
        run_eval(&CliConfig::new(), &args, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 − 8 =\n-5\n");
    }

    #[test]
    fn test_eval_rejects_unknown_character() {
        let mut out = Vec::new();
        let args = EvalArgs {
            script: "2^3".into(),
        };
        let err = run_eval(&CliConfig::new(), &args, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Calculator(CalcError::UnknownKey(_))));
        assert!(out.is_empty());
    }

    // ===== repl tests =====

    #[test]
    fn test_repl_prints_a_line_per_input() {
        let out = repl(&CliConfig::new(), InputMode::Keyboard, "7 +\n3 =\n\nquit\n4\n");
        assert_eq!(out, "7  [7 +]\n10  [7 + 3 =]\n");
    }

    #[test]
    fn test_repl_skips_unknown_keys() {
        let out = repl(&CliConfig::new(), InputMode::Keypad, "1 Enter 2\n");
        assert_eq!(out, "12\n");
    }

    #[test]
    fn test_repl_json_lines() {
        let config = CliConfig::new().with_format(OutputFormat::Json);
        let out = repl(&config, InputMode::Keyboard, "5\n/ 0 =\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["display"], "Error");
    }

    #[test]
    fn test_repl_trace_appends_transcript() {
        let config = CliConfig::new().with_trace(true);
        let out = repl(&config, InputMode::Keyboard, "1 + 1 =\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "2  [1 + 1 =]");
        assert_eq!(lines.len(), 5);
    }

    // ===== config tests =====

    #[test]
    fn test_config_prints_json() {
        let mut out = Vec::new();
        run_config(&CliConfig::new().with_trace(true), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["show_trace"], true);
        assert_eq!(value["format"], "text");
    }
}
