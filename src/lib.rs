//! arith - checked arithmetic and an expression calculator
//!
//! The arithmetic core is four pure functions, [`add`], [`subtract`],
//! [`multiply`] and [`divide`], generic over every primitive number type.
//! Division reports a zero divisor as [`ArithmeticError::DivisionByZero`]
//! instead of panicking or returning infinity.
//!
//! On top of that sits a small calculator: an expression parser, a session
//! with variables and `ans`, bounded history, and the `arith` CLI.
//!
//! # Architecture
//!
//! - **core**: arithmetic functions, parser, evaluator, history, config loading
//! - **commands**: CLI command implementations (calc, eval, repl, history, init)
//! - **models**: Data structures (config, value, operation, mode, history entry)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use crate::core::arithmetic::{add, divide, multiply, subtract, Number};
pub use error::{ArithmeticError, CalcError, Result};
