use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary operation understood by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl Operation {
    /// All operations, in precedence-agnostic display order
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Remainder,
        Operation::Power,
    ];

    /// Infix symbol used in expressions
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
            Operation::Remainder => '%',
            Operation::Power => '^',
        }
    }

    /// Lowercase name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Remainder => "remainder",
            Operation::Power => "power",
        }
    }

    /// Map an infix symbol back to its operation
    pub fn from_symbol(symbol: char) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "plus" | "+" => Ok(Operation::Add),
            "sub" | "subtract" | "minus" | "-" => Ok(Operation::Subtract),
            "mul" | "multiply" | "times" | "*" | "x" => Ok(Operation::Multiply),
            "div" | "divide" | "/" => Ok(Operation::Divide),
            "mod" | "rem" | "remainder" | "%" => Ok(Operation::Remainder),
            "pow" | "power" | "^" => Ok(Operation::Power),
            other => Err(format!(
                "unknown operation '{}' (expected add, sub, mul, div, mod or pow)",
                other
            )),
        }
    }
}
