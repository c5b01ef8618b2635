use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::{open_history, Calculator, HistoryManager};
use crate::error::CalcError;
use crate::models::{Config, Value};

/// JSON shape printed by `arith eval --json`
#[derive(Debug, Clone, Serialize)]
pub struct EvalOutput {
    pub expression: String,
    pub result: Value,
    pub formatted: String,
}

/// Evaluate expressions in order within one session, recording each in history.
///
/// Stops at the first failure; everything evaluated so far is still recorded.
pub fn evaluate_all(
    calculator: &mut Calculator,
    history: &mut HistoryManager,
    expressions: &[String],
    precision: usize,
) -> Result<Vec<EvalOutput>, CalcError> {
    let mut outputs = Vec::with_capacity(expressions.len());

    for expression in expressions {
        match calculator.evaluate(expression) {
            Ok(result) => {
                debug!("{} = {}", expression, result);
                history.record_success(expression, result);
                outputs.push(EvalOutput {
                    expression: expression.trim().to_string(),
                    result,
                    formatted: result.format(precision),
                });
            }
            Err(e) => {
                history.record_failure(expression, &e.to_string());
                return Err(e);
            }
        }
    }

    Ok(outputs)
}

/// Evaluate the given expressions and print their results
pub fn run_eval(
    project_root: &Path,
    config: &Config,
    expressions: &[String],
    json: bool,
) -> Result<(), CalcError> {
    let mut calculator = Calculator::new(config.numbers.mode);
    let mut history = open_history(project_root, config)?;

    let result = evaluate_all(
        &mut calculator,
        &mut history,
        expressions,
        config.display.precision,
    );

    if let Err(e) = history.save() {
        warn!("Could not save history: {}", e);
    }

    for output in result? {
        if json {
            println!("{}", serde_json::to_string(&output)?);
        } else {
            println!("{}", output.formatted);
        }
    }

    Ok(())
}
