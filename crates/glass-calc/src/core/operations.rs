//! Binary operators and their arithmetic

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// The closed set of binary operators on the calculator keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (−)
    #[serde(rename = "−")]
    Subtract,
    /// Multiplication (×)
    #[serde(rename = "×")]
    Multiply,
    /// Division (÷)
    #[serde(rename = "÷")]
    Divide,
    /// Remainder (%)
    #[serde(rename = "%")]
    Remainder,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Remainder,
    ];

    /// Returns the symbol shown on the keypad and in the operation trace
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Remainder => "%",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    /// Accepts the keypad symbols and their ASCII keyboard aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "−" | "-" => Ok(Self::Subtract),
            "×" | "*" => Ok(Self::Multiply),
            "÷" | "/" => Ok(Self::Divide),
            "%" => Ok(Self::Remainder),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}

/// Applies `op` to `a` and `b`.
///
/// Only division checks its divisor. The remainder keeps IEEE semantics:
/// the sign follows the dividend and a zero divisor gives `NaN`.
pub fn apply(op: Operator, a: f64, b: f64) -> CalcResult<f64> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                return Err(CalcError::DivideByZero);
            }
            Ok(a / b)
        }
        Operator::Remainder => Ok(a % b),
    }
}
