use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional digits shown when no precision is configured
pub const DEFAULT_PRECISION: usize = 10;

/// Most fractional digits an `f64` can meaningfully show
pub const MAX_PRECISION: usize = 17;

/// Magnitude above which decimals switch to scientific notation
const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// A calculator result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Integer(n) => n as f64,
            Value::Decimal(x) => x,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Value::Integer(n) => n == 0,
            Value::Decimal(x) => x == 0.0,
        }
    }

    /// Collapse an integral decimal into an integer when it fits in `i64`
    pub fn from_f64_exact(x: f64) -> Value {
        // 2^63 is exactly representable; anything at or above it does not fit
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if x.is_finite() && x.fract() == 0.0 && x >= -LIMIT && x < LIMIT {
            Value::Integer(x as i64)
        } else {
            Value::Decimal(x)
        }
    }

    /// Render with at most `precision` fractional digits, trailing zeros trimmed.
    ///
    /// Precision above [`MAX_PRECISION`] is treated as `MAX_PRECISION`.
    pub fn format(&self, precision: usize) -> String {
        match *self {
            Value::Integer(n) => n.to_string(),
            Value::Decimal(x) => format_decimal(x, precision),
        }
    }
}

fn format_decimal(x: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let magnitude = x.abs();
    let smallest_shown = 10f64.powi(-(precision as i32));
    if magnitude >= SCIENTIFIC_THRESHOLD || magnitude < smallest_shown {
        let scientific = format!("{:.*e}", precision.min(15), x);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let mantissa = if mantissa.contains('.') {
                    mantissa.trim_end_matches('0').trim_end_matches('.')
                } else {
                    mantissa
                };
                format!("{}e{}", mantissa, exponent)
            }
            None => scientific,
        };
    }

    let mut text = format!("{:.*}", precision, x);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(DEFAULT_PRECISION))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Decimal(x)
    }
}
