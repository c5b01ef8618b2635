pub mod arithmetic;
pub mod config;
pub mod evaluator;
pub mod history;
pub mod parser;

pub use arithmetic::*;
pub use config::*;
pub use evaluator::*;
pub use history::*;
pub use parser::{parse, Expr};
