//! Glass Calculator - event-driven arithmetic engine
//!
//! A pocket-calculator state machine: digits, a decimal point, five binary
//! operators, equals, clear and all-clear. Each event maps the current
//! state to a new one through a pure transition; a thin owner keeps the
//! current value and exposes the two fields a display renders.
//!
//! # Example
//!
//! ```rust
//! use glass_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for key in ["7", "+", "3", "Enter"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(calc.display(), "10");
//! assert_eq!(calc.previous_display(), "7 + 3 =");
//!
//! // Division by zero is a display state, not a failure
//! for key in ["5", "/", "0", "="] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(calc.display(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod calculator;
pub mod core;
pub mod driver;
pub mod keyboard;
pub mod keypad;
pub mod transcript;

pub use calculator::Calculator;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::Calculator;
    pub use crate::core::format::{format_number, number_to_string, parse_display};
    pub use crate::core::state::{transition, CalculatorState, Digit, Event, Phase};
    pub use crate::core::{apply, CalcError, CalcResult, Operator};
    pub use crate::driver::{CalculatorDriver, KeyboardDriver, KeypadDriver, Recorder};
    pub use crate::keyboard::{script, translate_key};
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::transcript::{Transcript, TranscriptStep};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn press_all(calc: &mut Calculator, keys: &str) {
        for event in script(keys).unwrap() {
            calc.dispatch(event);
        }
    }

    #[test]
    fn test_prelude_imports() {
        let state = transition(&CalculatorState::new(), Event::Digit(Digit::ALL[4]));
        assert_eq!(state.display(), "4");
        assert_eq!(apply(Operator::Multiply, 6.0, 7.0), Ok(42.0));
    }

    // ===== End-to-end scenarios =====

    #[test]
    fn test_scenario_addition() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "7+3=");
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.previous_display(), "7 + 3 =");
    }

    #[test]
    fn test_scenario_divide_by_zero() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5/0=");
        assert_eq!(calc.display(), "Error");
        assert_eq!(calc.previous_display(), "");
        press_all(&mut calc, "2");
        assert_eq!(calc.display(), "2");
    }

    #[test]
    fn test_scenario_double_decimal() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "1..");
        assert_eq!(calc.display(), "1.");
    }

    #[test]
    fn test_scenario_chained_operator() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9+9+");
        assert_eq!(calc.display(), "18");
        assert_eq!(calc.previous_display(), "9 + 9 =");
        assert_eq!(calc.state().operation(), Some(Operator::Add));
        assert_eq!(calc.state().previous_value(), Some(18.0));
    }

    #[test]
    fn test_scenario_thirteen_digits() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9876543210987");
        assert_eq!(calc.display(), "987654321098");
    }

    #[test]
    fn test_scenario_exponential_result() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "1000000*1000000000=");
        assert_eq!(calc.display(), "1.000000e+15");
    }

    #[test]
    fn test_scenario_fraction_noise() {
        let mut calc = Calculator::new();
        press_all(&mut calc, ".1+.2=");
        assert_eq!(calc.display(), "0.3");
        assert_eq!(calc.previous_display(), "0.1 + 0.2 =");
    }

    #[test]
    fn test_scenario_negative_result_feeds_next_operation() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "3-8=");
        assert_eq!(calc.display(), "-5");
        press_all(&mut calc, "*2=");
        assert_eq!(calc.display(), "-10");
        assert_eq!(calc.previous_display(), "-5 × 2 =");
    }

    #[test]
    fn test_scenario_tied_fraction_rounds_up() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "1/262144=");
        assert_eq!(calc.display(), "0.00000381469726563");
    }

    #[test]
    fn test_scenario_tied_exponential_rounds_up() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "100000050000*10000=");
        assert_eq!(calc.display(), "1.000001e+15");
        assert_eq!(calc.previous_display(), "100000050000 × 10000 =");
    }
}
