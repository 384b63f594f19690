//! Calculator state machine
//!
//! The state is a single value replaced wholesale on every event.
//! [`transition`] is a pure function of the previous state and the event;
//! owning and replacing the current value is left to
//! [`Calculator`](crate::Calculator).
//!
//! The conceptual phases (idle, operator chosen, entering the second
//! operand, error) are encoded in the fields and reported by
//! [`CalculatorState::phase`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::format::{
    format_number, number_to_string, parse_display, ERROR_TOKEN, MAX_DISPLAY_LEN,
};
use crate::core::{apply, CalcError, CalcResult, Operator};

/// A single decimal digit `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All ten digits, indexed by value
    pub const ALL: [Self; 10] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a digit, rejecting values above 9
    pub fn new(value: u8) -> CalcResult<Self> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(CalcError::InvalidDigit(value.to_string()))
        }
    }

    /// Numeric value of the digit
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The digit as an ASCII character
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or_else(|| CalcError::InvalidDigit(c.to_string()))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete input events accepted by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Digit key
    Digit(Digit),
    /// Decimal point key
    Decimal,
    /// Binary operator key
    Operator(Operator),
    /// Equals key
    Equals,
    /// Clear the entry line only
    Clear,
    /// Reset to the identity state
    AllClear,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("C"),
            Self::AllClear => f.write_str("AC"),
        }
    }
}

/// The left operand and operator of an unresolved operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// Left operand accumulated so far
    pub operand: f64,
    /// Operator waiting for its right operand
    pub operator: Operator,
}

/// Phase described by a state's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No pending operation
    Idle,
    /// Operator chosen, next digit starts the right operand
    PendingOperator,
    /// Typing the right operand
    Entering,
    /// The entry line holds the error token
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::PendingOperator => "pending-operator",
            Self::Entering => "entering",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Complete calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    display: String,
    previous_display: String,
    pending: Option<PendingOperation>,
    waiting_for_new_value: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// The identity state: `"0"` on the entry line, nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            previous_display: String::new(),
            pending: None,
            waiting_for_new_value: false,
        }
    }

    /// State after a failed evaluation
    #[must_use]
    pub fn error() -> Self {
        Self {
            display: ERROR_TOKEN.to_string(),
            previous_display: String::new(),
            pending: None,
            waiting_for_new_value: true,
        }
    }

    /// The entry line
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Trace of the last completed or in-flight operation
    #[must_use]
    pub fn previous_display(&self) -> &str {
        &self.previous_display
    }

    /// The pending operator, if any
    #[must_use]
    pub fn operation(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    /// The left operand of the pending operation, if any
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    /// The pending operand/operator pair
    #[must_use]
    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub fn waiting_for_new_value(&self) -> bool {
        self.waiting_for_new_value
    }

    /// Whether this is the identity state
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }

    /// The phase these fields describe
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.display == ERROR_TOKEN {
            Phase::Error
        } else if self.pending.is_none() {
            Phase::Idle
        } else if self.waiting_for_new_value {
            Phase::PendingOperator
        } else {
            Phase::Entering
        }
    }
}

/// Computes the state that follows `state` after `event`
#[must_use]
pub fn transition(state: &CalculatorState, event: Event) -> CalculatorState {
    match event {
        Event::Digit(d) => enter_digit(state, d),
        Event::Decimal => enter_decimal(state),
        Event::Operator(op) => choose_operator(state, op),
        Event::Equals => resolve(state),
        Event::Clear => CalculatorState {
            display: "0".to_string(),
            ..state.clone()
        },
        Event::AllClear => CalculatorState::new(),
    }
}

fn enter_digit(state: &CalculatorState, digit: Digit) -> CalculatorState {
    if state.waiting_for_new_value {
        return CalculatorState {
            display: digit.to_string(),
            waiting_for_new_value: false,
            ..state.clone()
        };
    }
    if state.display == "0" {
        return CalculatorState {
            display: digit.to_string(),
            ..state.clone()
        };
    }
    if state.display.len() >= MAX_DISPLAY_LEN {
        return state.clone();
    }

    let mut display = state.display.clone();
    display.push(digit.as_char());
    CalculatorState {
        display,
        ..state.clone()
    }
}

/// Appends the decimal point to the entry line.
///
/// Unlike the plain "append '.'" rule of the web calculator, a full
/// 12-character entry line ignores the point so typing never exceeds the
/// display width.
fn enter_decimal(state: &CalculatorState) -> CalculatorState {
    if state.waiting_for_new_value {
        return CalculatorState {
            display: "0.".to_string(),
            waiting_for_new_value: false,
            ..state.clone()
        };
    }
    if state.display.contains('.') || state.display.len() >= MAX_DISPLAY_LEN {
        return state.clone();
    }

    let mut display = state.display.clone();
    display.push('.');
    CalculatorState {
        display,
        ..state.clone()
    }
}

fn choose_operator(state: &CalculatorState, op: Operator) -> CalculatorState {
    let current = parse_display(&state.display);

    match state.pending {
        Some(pending) if !state.waiting_for_new_value => match evaluate(pending, current) {
            Ok(evaluation) => CalculatorState {
                display: format_number(evaluation.result),
                previous_display: evaluation.trace,
                pending: Some(PendingOperation {
                    operand: evaluation.result,
                    operator: op,
                }),
                waiting_for_new_value: true,
            },
            Err(_) => CalculatorState::error(),
        },
        _ => CalculatorState {
            display: state.display.clone(),
            previous_display: format!("{} {op}", number_to_string(current)),
            pending: Some(PendingOperation {
                operand: current,
                operator: op,
            }),
            waiting_for_new_value: true,
        },
    }
}

fn resolve(state: &CalculatorState) -> CalculatorState {
    let Some(pending) = state.pending else {
        return state.clone();
    };

    match evaluate(pending, parse_display(&state.display)) {
        Ok(evaluation) => CalculatorState {
            display: format_number(evaluation.result),
            previous_display: evaluation.trace,
            pending: None,
            waiting_for_new_value: true,
        },
        Err(_) => CalculatorState::error(),
    }
}

struct Evaluation {
    result: f64,
    trace: String,
}

fn evaluate(pending: PendingOperation, current: f64) -> CalcResult<Evaluation> {
    let result = apply(pending.operator, pending.operand, current)?;
    Ok(Evaluation {
        result,
        trace: format!(
            "{} {} {} =",
            number_to_string(pending.operand),
            pending.operator,
            number_to_string(current)
        ),
    })
}
