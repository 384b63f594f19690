//! Calculator owner
//!
//! Holds the current [`CalculatorState`] and replaces it with the result of
//! [`transition`] on every submitted event. This is the API a front end
//! talks to: one `submit_*` call per button, [`Calculator::handle_key`] for
//! keyboard input, and the two read-only output fields.

use tracing::{debug, trace, warn};

use crate::core::state::{transition, CalculatorState, Digit, Event, Phase};
use crate::core::Operator;
use crate::keyboard::translate_key;

/// Stateful calculator driven by discrete events
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Creates a calculator in the identity state
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CalculatorState::new(),
        }
    }

    /// Creates a calculator that resumes from `state`
    #[must_use]
    pub fn from_state(state: CalculatorState) -> Self {
        Self { state }
    }

    /// The current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The entry line
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Trace of the last completed or in-flight operation
    #[must_use]
    pub fn previous_display(&self) -> &str {
        self.state.previous_display()
    }

    /// The phase of the current state
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Applies `event` and replaces the current state
    pub fn dispatch(&mut self, event: Event) -> &CalculatorState {
        let next = transition(&self.state, event);

        if next.phase() == Phase::Error && self.state.phase() != Phase::Error {
            warn!(
                %event,
                operand = ?self.state.previous_value(),
                entry = self.state.display(),
                "evaluation failed, entering error state"
            );
        }
        debug!(
            %event,
            display = next.display(),
            previous = next.previous_display(),
            phase = %next.phase(),
            "dispatched event"
        );

        self.state = next;
        &self.state
    }

    /// Digit button
    pub fn submit_digit(&mut self, digit: Digit) {
        self.dispatch(Event::Digit(digit));
    }

    /// Decimal point button
    pub fn submit_decimal(&mut self) {
        self.dispatch(Event::Decimal);
    }

    /// Operator button
    pub fn submit_operator(&mut self, op: Operator) {
        self.dispatch(Event::Operator(op));
    }

    /// Equals button
    pub fn submit_equals(&mut self) {
        self.dispatch(Event::Equals);
    }

    /// Clear button: resets the entry line only
    pub fn submit_clear(&mut self) {
        self.dispatch(Event::Clear);
    }

    /// All-clear button: resets to the identity state
    pub fn submit_all_clear(&mut self) {
        self.dispatch(Event::AllClear);
    }

    /// Translates a keyboard key and dispatches it.
    ///
    /// Returns false, leaving the state untouched, for keys without a
    /// calculator meaning.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match translate_key(key) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => {
                trace!(key, "ignoring key");
                false
            }
        }
    }
}
