use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the calculator represents numbers while evaluating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    /// Integers stay integers while results are exact, with overflow checks
    #[default]
    Exact,
    /// Everything is evaluated as a 64-bit float
    Float,
}

impl NumberMode {
    pub fn name(&self) -> &'static str {
        match self {
            NumberMode::Exact => "exact",
            NumberMode::Float => "float",
        }
    }
}

impl fmt::Display for NumberMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
