//! On-screen keypad layout
//!
//! The button panel a front end renders. Each button carries the event it
//! submits, so a click handler only has to look the button up.
//!
//! ```text
//! [ AC ] [ C ] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [   0    ] [ . ] [ = ]
//! ```

use crate::core::state::{Digit, Event};
use crate::core::{CalcError, CalcResult, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text printed on the button
    pub label: String,
    /// Stable element id, e.g. `button-number-7`
    pub id: String,
    /// Event submitted when the button is pressed
    pub event: Event,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns the button spans
    pub span: usize,
}

impl KeypadButton {
    /// Creates a one-column button for `event`
    #[must_use]
    pub fn new(event: Event, row: usize, col: usize) -> Self {
        let id = match event {
            Event::Digit(d) => format!("button-number-{d}"),
            Event::Decimal => "button-decimal".to_string(),
            Event::Operator(op) => format!("button-{}", operator_name(op)),
            Event::Equals => "button-equals".to_string(),
            Event::Clear => "button-clear".to_string(),
            Event::AllClear => "button-all-clear".to_string(),
        };
        Self {
            label: event.to_string(),
            id,
            event,
            row,
            col,
            span: 1,
        }
    }

    /// Sets the column span
    #[must_use]
    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Whether the button covers grid cell `(row, col)`
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }
}

fn operator_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "add",
        Operator::Subtract => "subtract",
        Operator::Multiply => "multiply",
        Operator::Divide => "divide",
        Operator::Remainder => "percentage",
    }
}

/// The standard calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard 5x4 keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: usize| Event::Digit(Digit::ALL[d]);
        let op = Event::Operator;

        let buttons = vec![
            // Row 0: AC C % ÷
            KeypadButton::new(Event::AllClear, 0, 0),
            KeypadButton::new(Event::Clear, 0, 1),
            KeypadButton::new(op(Operator::Remainder), 0, 2),
            KeypadButton::new(op(Operator::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButton::new(digit(7), 1, 0),
            KeypadButton::new(digit(8), 1, 1),
            KeypadButton::new(digit(9), 1, 2),
            KeypadButton::new(op(Operator::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButton::new(digit(4), 2, 0),
            KeypadButton::new(digit(5), 2, 1),
            KeypadButton::new(digit(6), 2, 2),
            KeypadButton::new(op(Operator::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::new(digit(1), 3, 0),
            KeypadButton::new(digit(2), 3, 1),
            KeypadButton::new(digit(3), 3, 2),
            KeypadButton::new(op(Operator::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButton::new(digit(0), 4, 0).with_span(2),
            KeypadButton::new(Event::Decimal, 4, 2),
            KeypadButton::new(Event::Equals, 4, 3),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions as `(rows, cols)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The button covering grid cell `(row, col)`
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Looks a button up by its label
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label == label)
    }

    /// Looks a button up by its element id
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Resolves a button label to the event it submits
    pub fn event_for(&self, label: &str) -> CalcResult<Event> {
        self.find(label)
            .map(|b| b.event)
            .ok_or_else(|| CalcError::UnknownKey(label.to_string()))
    }
}
