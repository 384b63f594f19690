//! Keyboard key translation
//!
//! Maps raw key names (as reported by a browser `KeyboardEvent.key` or a
//! terminal front end) to calculator events. Keys without a calculator
//! meaning translate to `None` and are ignored by the caller.

use crate::core::state::{Digit, Event};
use crate::core::{CalcError, CalcResult, Operator};

/// Translates a key name into a calculator event
#[must_use]
pub fn translate_key(key: &str) -> Option<Event> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Ok(digit) = Digit::try_from(c) {
            return Some(Event::Digit(digit));
        }
    }

    match key {
        "+" => Some(Event::Operator(Operator::Add)),
        "-" => Some(Event::Operator(Operator::Subtract)),
        "*" => Some(Event::Operator(Operator::Multiply)),
        "/" => Some(Event::Operator(Operator::Divide)),
        "%" => Some(Event::Operator(Operator::Remainder)),
        "." => Some(Event::Decimal),
        "Enter" | "=" => Some(Event::Equals),
        "Escape" => Some(Event::AllClear),
        "Backspace" => Some(Event::Clear),
        _ => None,
    }
}

/// Returns true if the key has a calculator meaning
#[must_use]
pub fn is_calculator_key(key: &str) -> bool {
    translate_key(key).is_some()
}

/// The key name that [`translate_key`] maps to `event`
#[must_use]
pub fn key_for(event: Event) -> String {
    match event {
        Event::Digit(d) => d.to_string(),
        Event::Decimal => ".".to_string(),
        Event::Operator(op) => match op {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Remainder => "%",
        }
        .to_string(),
        Event::Equals => "Enter".to_string(),
        Event::Clear => "Backspace".to_string(),
        Event::AllClear => "Escape".to_string(),
    }
}

/// Translates a compact key script such as `"7+3="`, one key per character.
///
/// Whitespace is skipped. Any other character without a calculator meaning
/// is an error.
pub fn script(keys: &str) -> CalcResult<Vec<Event>> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            let key = c.to_string();
            translate_key(&key).ok_or(CalcError::UnknownKey(key))
        })
        .collect()
}
