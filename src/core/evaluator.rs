use regex::Regex;
use std::collections::BTreeMap;
use std::f64::consts::{E, PI};
use std::sync::OnceLock;
use tracing::debug;

use crate::core::arithmetic::{
    checked_add, checked_multiply, checked_subtract, divide, percentage, power, remainder,
    square, square_root,
};
use crate::core::parser::{parse, Expr};
use crate::error::{ArithmeticError, CalcError, Result};
use crate::models::{NumberMode, Operation, Value};

/// Name bound to the most recent result
pub const ANSWER: &str = "ans";

/// Built-in constants
pub const CONSTANTS: [(&str, f64); 2] = [("pi", PI), ("e", E)];

/// Built-in single-argument functions
pub const FUNCTIONS: [&str; 4] = ["sqrt", "square", "abs", "percent"];

fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$").expect("assignment pattern is valid")
    })
}

/// Split `name = expr` into its parts; anything else is not an assignment
pub fn split_assignment(input: &str) -> Option<(&str, &str)> {
    let caps = assignment_pattern().captures(input)?;
    let name = caps.get(1)?.as_str();
    let expression = caps.get(2)?.as_str();
    Some((name, expression))
}

/// True for names that cannot be assigned to
pub fn is_reserved(name: &str) -> bool {
    name == ANSWER
        || CONSTANTS.iter().any(|(c, _)| *c == name)
        || FUNCTIONS.contains(&name)
}

/// Apply a binary operation to two values under the given number mode.
///
/// In exact mode two integers use checked integer arithmetic, and a division
/// that does not come out even produces a decimal. Every other combination is
/// evaluated in `f64`.
pub fn apply(
    op: Operation,
    lhs: Value,
    rhs: Value,
    mode: NumberMode,
) -> std::result::Result<Value, ArithmeticError> {
    match (mode, lhs, rhs) {
        (NumberMode::Exact, Value::Integer(a), Value::Integer(b)) => apply_integers(op, a, b),
        _ => apply_decimals(op, lhs.as_f64(), rhs.as_f64()),
    }
}

fn apply_integers(op: Operation, a: i64, b: i64) -> std::result::Result<Value, ArithmeticError> {
    let value = match op {
        Operation::Add => checked_add(a, b)?,
        Operation::Subtract => checked_subtract(a, b)?,
        Operation::Multiply => checked_multiply(a, b)?,
        Operation::Divide => match remainder(a, b) {
            Ok(0) => divide(a, b)?,
            Ok(_) => return Ok(Value::Decimal(divide(a as f64, b as f64)?)),
            Err(ArithmeticError::Overflow { .. }) => {
                return Err(ArithmeticError::Overflow {
                    operation: Operation::Divide,
                })
            }
            Err(e) => return Err(e),
        },
        Operation::Remainder => remainder(a, b)?,
        Operation::Power => {
            if b < 0 {
                return apply_decimals(op, a as f64, b as f64);
            }
            match u32::try_from(b) {
                Ok(exp) => power(a, exp)?,
                // Only 0, 1 and -1 stay in range for exponents this large
                Err(_) => match a {
                    0 | 1 => a,
                    -1 if b % 2 == 0 => 1,
                    -1 => -1,
                    _ => {
                        return Err(ArithmeticError::Overflow {
                            operation: Operation::Power,
                        })
                    }
                },
            }
        }
    };
    Ok(Value::Integer(value))
}

fn apply_decimals(op: Operation, a: f64, b: f64) -> std::result::Result<Value, ArithmeticError> {
    let result = match op {
        Operation::Add => checked_add(a, b)?,
        Operation::Subtract => checked_subtract(a, b)?,
        Operation::Multiply => checked_multiply(a, b)?,
        Operation::Divide => divide(a, b)?,
        Operation::Remainder => remainder(a, b)?,
        Operation::Power => float_power(a, b)?,
    };
    if result.is_nan() {
        return Err(ArithmeticError::Domain(format!(
            "{} of {} and {} is undefined",
            op, a, b
        )));
    }
    if !result.is_finite() {
        return Err(ArithmeticError::Overflow { operation: op });
    }
    Ok(Value::Decimal(result))
}

fn float_power(base: f64, exp: f64) -> std::result::Result<f64, ArithmeticError> {
    let result = base.powf(exp);
    if result.is_nan() && !base.is_nan() && !exp.is_nan() {
        return Err(ArithmeticError::Domain(format!(
            "cannot raise {} to the fractional power {}",
            base, exp
        )));
    }
    if !result.is_finite() && base.is_finite() && exp.is_finite() {
        if base == 0.0 && exp < 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        return Err(ArithmeticError::Overflow {
            operation: Operation::Power,
        });
    }
    Ok(result)
}

/// A calculator session: number mode, user variables and the last answer
#[derive(Debug, Clone)]
pub struct Calculator {
    mode: NumberMode,
    variables: BTreeMap<String, Value>,
    answer: Value,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(NumberMode::default())
    }
}

impl Calculator {
    pub fn new(mode: NumberMode) -> Self {
        Self {
            mode,
            variables: BTreeMap::new(),
            answer: Value::Integer(0),
        }
    }

    pub fn mode(&self) -> NumberMode {
        self.mode
    }

    /// Most recent successful result (zero in a fresh session)
    pub fn answer(&self) -> Value {
        self.answer
    }

    /// Evaluate one line: either `name = expr` or a bare expression.
    ///
    /// Successful results, including assigned values, become the new `ans`.
    pub fn evaluate(&mut self, input: &str) -> Result<Value> {
        let value = match split_assignment(input) {
            Some((name, expression)) => {
                if is_reserved(name) {
                    return Err(CalcError::InvalidAssignment(name.to_string()));
                }
                let value = self.evaluate_expr(&parse(expression)?)?;
                debug!("Assigned {} = {}", name, value);
                self.variables.insert(name.to_string(), value);
                value
            }
            None => self.evaluate_expr(&parse(input)?)?,
        };
        self.answer = value;
        Ok(value)
    }

    /// Evaluate a parsed expression without touching session state
    pub fn evaluate_expr(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Number(value) => Ok(self.coerce(*value)),
            Expr::Variable(name) => self.lookup(name),
            Expr::Negate(inner) => {
                let value = self.evaluate_expr(inner)?;
                Ok(negate(value)?)
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate_expr(lhs)?;
                let rhs = self.evaluate_expr(rhs)?;
                Ok(apply(*op, lhs, rhs, self.mode)?)
            }
            Expr::Call { function, argument } => {
                let argument = self.evaluate_expr(argument)?;
                self.call(function, argument)
            }
        }
    }

    /// Apply one operation directly, bypassing the parser
    pub fn apply(&self, op: Operation, lhs: Value, rhs: Value) -> Result<Value> {
        Ok(apply(op, self.coerce(lhs), self.coerce(rhs), self.mode)?)
    }

    pub fn variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).copied()
    }

    /// User variables, sorted by name
    pub fn variables(&self) -> Vec<(&str, Value)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect()
    }

    /// Reset `ans` to zero, keeping variables
    pub fn clear(&mut self) {
        self.answer = Value::Integer(0);
    }

    /// Forget variables and reset `ans`
    pub fn reset(&mut self) {
        self.variables.clear();
        self.clear();
    }

    fn coerce(&self, value: Value) -> Value {
        match (self.mode, value) {
            (NumberMode::Float, Value::Integer(n)) => Value::Decimal(n as f64),
            _ => value,
        }
    }

    /// Results computed in floating point collapse back to integers in exact mode
    fn settle(&self, x: f64) -> Value {
        match self.mode {
            NumberMode::Exact => Value::from_f64_exact(x),
            NumberMode::Float => Value::Decimal(x),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        if name == ANSWER {
            return Ok(self.coerce(self.answer));
        }
        if let Some(value) = self.variables.get(name) {
            return Ok(self.coerce(*value));
        }
        CONSTANTS
            .iter()
            .find(|(constant, _)| *constant == name)
            .map(|(_, x)| Value::Decimal(*x))
            .ok_or_else(|| CalcError::UnknownVariable(name.to_string()))
    }

    fn call(&self, function: &str, argument: Value) -> Result<Value> {
        let value = match (function, argument) {
            ("sqrt", arg) => self.settle(square_root(arg.as_f64())?),
            ("square", Value::Integer(n)) => Value::Integer(square(n)?),
            ("square", Value::Decimal(x)) => Value::Decimal(square(x)?),
            ("abs", Value::Integer(n)) => match n.checked_abs() {
                Some(abs) => Value::Integer(abs),
                None => {
                    return Err(ArithmeticError::Domain(format!(
                        "abs({}) does not fit in a 64-bit integer",
                        n
                    ))
                    .into())
                }
            },
            ("abs", Value::Decimal(x)) => Value::Decimal(x.abs()),
            ("percent", arg) => self.settle(percentage(arg.as_f64())),
            (other, _) => return Err(CalcError::UnknownFunction(other.to_string())),
        };
        Ok(value)
    }
}

fn negate(value: Value) -> std::result::Result<Value, ArithmeticError> {
    match value {
        Value::Integer(n) => checked_subtract(0, n).map(Value::Integer),
        Value::Decimal(x) => Ok(Value::Decimal(-x)),
    }
}
