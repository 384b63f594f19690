//! Display formatting and parsing
//!
//! Two renderings exist. [`format_number`] produces the entry line after an
//! evaluation and is bound by the 12 character display. [`number_to_string`]
//! is the plain shortest round-trip rendering used for operands in the
//! operation trace.

/// Maximum number of characters the entry line grows to while typing
pub const MAX_DISPLAY_LEN: usize = 12;

/// Significant digits kept when a plain result does not fit the display
pub const SIGNIFICANT_DIGITS: usize = 12;

/// Fractional digits of the exponential rendering
pub const EXPONENT_FRACTION_DIGITS: usize = 6;

/// Largest magnitude rendered without an exponent
pub const MAX_PLAIN_MAGNITUDE: f64 = 999_999_999_999.0;

/// Results below this magnitude are shown as zero.
///
/// This also collapses legitimately tiny results such as `1e-7`; kept for
/// compatibility with the established display behaviour.
pub const NEAR_ZERO: f64 = 1e-6;

/// The entry line after a failed evaluation
pub const ERROR_TOKEN: &str = "Error";

/// Enough fractional digits to spell out any finite `f64` exactly
const EXACT_DIGITS: usize = 800;

/// Formats an evaluation result for the entry line
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude < NEAR_ZERO {
        return "0".to_string();
    }
    if !n.is_finite() {
        return number_to_string(n);
    }
    if magnitude > MAX_PLAIN_MAGNITUDE {
        return to_exponential(n, EXPONENT_FRACTION_DIGITS);
    }

    let plain = number_to_string(n);
    if plain.len() > MAX_DISPLAY_LEN {
        number_to_string(round_to_significant(n, SIGNIFICANT_DIGITS))
    } else {
        plain
    }
}

/// Shortest decimal rendering that parses back to `n`.
///
/// Switches to exponential notation at or above `1e21` and below `1e-6`,
/// spells out the non-finite values and never prints a negative zero.
#[must_use]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return sign_exponent(&format!("{n:e}"));
    }
    format!("{n}")
}

/// Numeric value of a display string; `NaN` when it is not a number
#[must_use]
pub fn parse_display(display: &str) -> f64 {
    display.trim().parse().unwrap_or(f64::NAN)
}

/// Exponential rendering with a fixed number of fractional digits and a
/// signed exponent, e.g. `1.000000e+15`. Halfway cases round away from zero.
#[must_use]
pub fn to_exponential(n: f64, fraction_digits: usize) -> String {
    sign_exponent(&exponential_half_up(n, fraction_digits))
}

/// Rounds `n` to `digits` significant digits, halfway cases away from zero
#[must_use]
pub fn round_to_significant(n: f64, digits: usize) -> f64 {
    exponential_half_up(n, digits.saturating_sub(1))
        .parse()
        .unwrap_or(n)
}

/// Scientific rendering (`1.25e-3`, unsigned positive exponent) rounded at
/// `fraction_digits` from the exact decimal expansion of `n`.
///
/// `{:.Ne}` rounds ties to even; a displayed result must round them up.
fn exponential_half_up(n: f64, fraction_digits: usize) -> String {
    let fallback = || format!("{n:.fraction_digits$e}");
    if !n.is_finite() || n == 0.0 || fraction_digits >= EXACT_DIGITS {
        return fallback();
    }

    let exact = format!("{:.*e}", EXACT_DIGITS, n.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return fallback();
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return fallback();
    };
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    if digits.len() <= fraction_digits + 1 {
        return fallback();
    }

    let mut kept = digits[..=fraction_digits].to_vec();
    if digits[fraction_digits + 1] >= 5 {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        // 9.99… rolled over to 10.00…
        if carry {
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let fraction: String = kept[1..].iter().map(|d| char::from(b'0' + d)).collect();
    if fraction.is_empty() {
        format!("{sign}{}e{exponent}", kept[0])
    } else {
        format!("{sign}{}.{fraction}e{exponent}", kept[0])
    }
}

fn sign_exponent(rendered: &str) -> String {
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered.to_string(),
    }
}
