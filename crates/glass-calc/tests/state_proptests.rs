//! Property-based tests for the calculator state machine
//!
//! Random event sequences exercise the display invariants that must hold in
//! every reachable state, not just the hand-picked scenarios.

use glass_calc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = Digit> {
    (0u8..=9u8).prop_map(|d| Digit::ALL[d as usize])
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
        Just(Operator::Remainder),
    ]
}

/// Digits weighted up so sequences build real operands
fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        6 => digit_strategy().prop_map(Event::Digit),
        1 => Just(Event::Decimal),
        2 => operator_strategy().prop_map(Event::Operator),
        1 => Just(Event::Equals),
        1 => Just(Event::Clear),
        1 => Just(Event::AllClear),
    ]
}

fn events_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(event_strategy(), 0..60)
}

/// A typed operand: non-zero leading digit, optional single decimal point,
/// at most 12 characters
fn typed_operand_strategy() -> impl Strategy<Value = String> {
    ("[1-9][0-9]{0,10}", any::<prop::sample::Index>()).prop_map(|(digits, index)| {
        let point = index.index(digits.len() + 1);
        if point == digits.len() {
            digits
        } else {
            format!("{}.{}", &digits[..point.max(1)], &digits[point.max(1)..])
        }
    })
}

fn run(events: &[Event]) -> CalculatorState {
    events
        .iter()
        .fold(CalculatorState::new(), |state, event| transition(&state, *event))
}

// ===== Display invariants =====

proptest! {
    /// Digit entry never grows the display past 12 characters or adds a
    /// second decimal point
    #[test]
    fn prop_digit_entry_respects_display_limits(events in events_strategy(), d in digit_strategy()) {
        let state = transition(&run(&events), Event::Digit(d));
        prop_assert!(state.display().len() <= 12, "display {:?}", state.display());
        prop_assert!(state.display().matches('.').count() <= 1);
    }

    /// No reachable state shows two decimal points
    #[test]
    fn prop_at_most_one_decimal_point(events in events_strategy()) {
        let mut state = CalculatorState::new();
        for event in events {
            state = transition(&state, event);
            prop_assert!(state.display().matches('.').count() <= 1, "display {:?}", state.display());
        }
    }

    /// The pending operator and operand appear and disappear together
    #[test]
    fn prop_pending_pair_is_atomic(events in events_strategy()) {
        let state = run(&events);
        prop_assert_eq!(state.operation().is_some(), state.previous_value().is_some());
    }

    /// The error state never keeps a pending operation
    #[test]
    fn prop_error_state_has_no_pending_operation(events in events_strategy()) {
        let mut state = CalculatorState::new();
        for event in events {
            let next = transition(&state, event);
            let evaluated = matches!(event, Event::Operator(_) | Event::Equals);
            if evaluated && state.display() != "Error" && next.display() == "Error" {
                prop_assert!(next.pending().is_none());
                prop_assert_eq!(next.previous_display(), "");
                prop_assert!(next.waiting_for_new_value());
            }
            state = next;
        }
    }
}

// ===== Reset behaviour =====

proptest! {
    /// All-clear returns to the identity state from anywhere, every time
    #[test]
    fn prop_all_clear_is_idempotent(events in events_strategy(), repeats in 1usize..4) {
        let mut state = run(&events);
        for _ in 0..repeats {
            state = transition(&state, Event::AllClear);
            prop_assert!(state.is_identity());
        }
    }

    /// Clear only touches the entry line
    #[test]
    fn prop_clear_keeps_pending_operation(events in events_strategy()) {
        let before = run(&events);
        let after = transition(&before, Event::Clear);
        prop_assert_eq!(after.display(), "0");
        prop_assert_eq!(after.previous_display(), before.previous_display());
        prop_assert_eq!(after.operation(), before.operation());
        prop_assert_eq!(after.waiting_for_new_value(), before.waiting_for_new_value());
    }
}

// ===== Formatting =====

proptest! {
    /// Formatting a typed operand's value shows the same number again
    #[test]
    fn prop_format_parse_roundtrip(typed in typed_operand_strategy()) {
        let value = parse_display(&typed);
        let shown = format_number(value);
        prop_assert_eq!(parse_display(&shown), value, "{} rendered as {}", typed, shown);
        prop_assert!(shown.len() <= 12);
    }
}

// ===== Driver agreement =====

proptest! {
    /// Keypad labels and keyboard keys drive the machine identically
    #[test]
    fn prop_drivers_agree(events in events_strategy()) {
        let mut keypad = KeypadDriver::new();
        let mut keyboard = KeyboardDriver::new();
        keypad.submit_all(&events).unwrap();
        keyboard.submit_all(&events).unwrap();

        prop_assert_eq!(keypad.display(), keyboard.display());
        prop_assert_eq!(keypad.previous_display(), keyboard.previous_display());
        prop_assert_eq!(keypad.state().phase(), keyboard.state().phase());
    }
}
