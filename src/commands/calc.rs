use tracing::debug;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{Config, Operation, Value};

/// Parse a literal operand given on the command line
pub fn parse_operand(text: &str) -> Result<Value, CalcError> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Value::Integer(n));
    }
    match trimmed.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(Value::Decimal(x)),
        _ => Err(CalcError::InvalidOperand(text.to_string())),
    }
}

/// Apply a single operation to two literal operands and format the result
pub fn run_calc(config: &Config, op: Operation, lhs: &str, rhs: &str) -> Result<String, CalcError> {
    let lhs = parse_operand(lhs)?;
    let rhs = parse_operand(rhs)?;
    debug!("calc {} {} {}", lhs, op, rhs);

    let calculator = Calculator::new(config.numbers.mode);
    let result = calculator.apply(op, lhs, rhs)?;
    Ok(result.format(config.display.precision))
}
