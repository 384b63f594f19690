//! Calculator drivers
//!
//! A driver feeds named inputs into a [`Calculator`]. The keypad driver
//! speaks button labels, the keyboard driver speaks key names; both end in
//! the same state machine. The `verify_*` functions below are written once
//! against the [`CalculatorDriver`] trait and run against either.
//!
//! ```rust
//! use glass_calc::driver::{verify_basic_arithmetic, KeyboardDriver, KeypadDriver};
//!
//! verify_basic_arithmetic(&mut KeypadDriver::new()).unwrap();
//! verify_basic_arithmetic(&mut KeyboardDriver::new()).unwrap();
//! ```

use crate::calculator::Calculator;
use crate::core::state::{CalculatorState, Event};
use crate::core::{CalcError, CalcResult, Operator};
use crate::keyboard::{key_for, script, translate_key};
use crate::keypad::Keypad;
use crate::transcript::Transcript;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses one input in the driver's own vocabulary
    fn press(&mut self, input: &str) -> CalcResult<Event>;

    /// The input name this driver uses for `event`
    fn input_for(&self, event: Event) -> String;

    /// The current calculator state
    fn state(&self) -> &CalculatorState;

    /// Returns the calculator to the identity state
    fn reset(&mut self);

    /// Presses whatever input produces `event`
    fn submit(&mut self, event: Event) -> CalcResult<()> {
        let input = self.input_for(event);
        self.press(&input).map(|_| ())
    }

    /// Submits every event in order, stopping at the first failure
    fn submit_all(&mut self, events: &[Event]) -> CalcResult<()> {
        events.iter().try_for_each(|event| self.submit(*event))
    }

    /// The entry line
    fn display(&self) -> &str {
        self.state().display()
    }

    /// Trace of the last completed or in-flight operation
    fn previous_display(&self) -> &str {
        self.state().previous_display()
    }
}

/// Drives the calculator through on-screen button labels
#[derive(Debug, Clone, Default)]
pub struct KeypadDriver {
    calculator: Calculator,
    keypad: Keypad,
}

impl KeypadDriver {
    /// Creates a keypad driver over a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
            keypad: Keypad::new(),
        }
    }

    /// The underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The keypad used to resolve labels
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press(&mut self, input: &str) -> CalcResult<Event> {
        let event = self.keypad.event_for(input)?;
        self.calculator.dispatch(event);
        Ok(event)
    }

    fn input_for(&self, event: Event) -> String {
        event.to_string()
    }

    fn state(&self) -> &CalculatorState {
        self.calculator.state()
    }

    fn reset(&mut self) {
        self.calculator = Calculator::new();
    }
}

/// Drives the calculator through keyboard key names
#[derive(Debug, Clone, Default)]
pub struct KeyboardDriver {
    calculator: Calculator,
}

impl KeyboardDriver {
    /// Creates a keyboard driver over a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
        }
    }

    /// The underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}

impl CalculatorDriver for KeyboardDriver {
    fn press(&mut self, input: &str) -> CalcResult<Event> {
        let event =
            translate_key(input).ok_or_else(|| CalcError::UnknownKey(input.to_string()))?;
        self.calculator.dispatch(event);
        Ok(event)
    }

    fn input_for(&self, event: Event) -> String {
        key_for(event)
    }

    fn state(&self) -> &CalculatorState {
        self.calculator.state()
    }

    fn reset(&mut self) {
        self.calculator = Calculator::new();
    }
}

/// Wraps a driver and records every press into a [`Transcript`]
#[derive(Debug, Clone, Default)]
pub struct Recorder<D> {
    driver: D,
    transcript: Transcript,
}

impl<D: CalculatorDriver> Recorder<D> {
    /// Starts recording on top of `driver`
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            transcript: Transcript::new(),
        }
    }

    /// Everything recorded so far
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The wrapped driver
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Stops recording and returns the transcript
    #[must_use]
    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }
}

impl<D: CalculatorDriver> CalculatorDriver for Recorder<D> {
    fn press(&mut self, input: &str) -> CalcResult<Event> {
        let result = self.driver.press(input);
        self.transcript
            .record(input, result.as_ref().ok().copied(), self.driver.state());
        result
    }

    fn input_for(&self, event: Event) -> String {
        self.driver.input_for(event)
    }

    fn state(&self) -> &CalculatorState {
        self.driver.state()
    }

    fn reset(&mut self) {
        self.driver.reset();
        self.transcript.clear();
    }
}

// ===== Driver-independent verification =====
// These work with ANY CalculatorDriver implementation

/// Verifies one evaluation per operator
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    let cases = [
        ("7+3=", "10", "7 + 3 ="),
        ("9-4=", "5", "9 − 4 ="),
        ("6*7=", "42", "6 × 7 ="),
        ("1/4=", "0.25", "1 ÷ 4 ="),
        ("17%5=", "2", "17 % 5 ="),
    ];

    for (keys, display, previous) in cases {
        driver.reset();
        driver.submit_all(&script(keys)?)?;
        assert_eq!(driver.display(), display, "display after {keys}");
        assert_eq!(driver.previous_display(), previous, "trace after {keys}");
    }
    Ok(())
}

/// Verifies the error state after dividing by zero and the way out of it
pub fn verify_divide_by_zero_recovery<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.submit_all(&script("5/0=")?)?;
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.previous_display(), "");
    assert_eq!(driver.state().operation(), None);
    assert_eq!(driver.state().previous_value(), None);

    driver.submit_all(&script("2")?)?;
    assert_eq!(driver.display(), "2");
    Ok(())
}

/// Verifies that a second operator resolves the pending operation
pub fn verify_chained_operations<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.submit_all(&script("9+9+")?)?;
    assert_eq!(driver.display(), "18");
    assert_eq!(driver.previous_display(), "9 + 9 =");
    assert_eq!(driver.state().operation(), Some(Operator::Add));
    assert_eq!(driver.state().previous_value(), Some(18.0));

    driver.submit_all(&script("2=")?)?;
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.previous_display(), "18 + 2 =");
    Ok(())
}

/// Verifies the decimal point rule, the display length cap and the
/// exponential rendering of large results
pub fn verify_entry_limits<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.reset();
    driver.submit_all(&script("1..")?)?;
    assert_eq!(driver.display(), "1.");

    driver.reset();
    driver.submit_all(&script("1234567890123")?)?;
    assert_eq!(driver.display(), "123456789012");

    driver.reset();
    driver.submit_all(&script("1000000*1000000000=")?)?;
    assert_eq!(driver.display(), "1.000000e+15");
    Ok(())
}

/// Runs every verification against `driver`
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_divide_by_zero_recovery(driver)?;
    verify_chained_operations(driver)?;
    verify_entry_limits(driver)
}
