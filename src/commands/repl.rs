use dialoguer::{theme::ColorfulTheme, Input};
use std::path::Path;
use tracing::{debug, info};

use crate::core::{open_history, Calculator, HistoryManager, CONSTANTS, FUNCTIONS};
use crate::error::CalcError;
use crate::models::{Config, Operation};

/// What the prompt loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    /// Print this text and keep reading
    Output(String),
    /// Nothing to print, keep reading
    Silent,
    /// Leave the loop
    Exit,
}

/// Interactive calculator state, independent of the terminal
pub struct Repl {
    calculator: Calculator,
    history: HistoryManager,
    precision: usize,
}

impl Repl {
    pub fn new(calculator: Calculator, history: HistoryManager, precision: usize) -> Self {
        Self {
            calculator,
            history,
            precision,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Handle one line of input
    pub fn handle_line(&mut self, line: &str) -> ReplOutcome {
        let input = line.trim();
        match input {
            "" => ReplOutcome::Silent,
            "exit" | "quit" => ReplOutcome::Exit,
            "help" => ReplOutcome::Output(help_text()),
            "clear" => {
                self.calculator.clear();
                ReplOutcome::Output("ans cleared".to_string())
            }
            "reset" => {
                self.calculator.reset();
                ReplOutcome::Output("Session reset".to_string())
            }
            "vars" => ReplOutcome::Output(self.format_variables()),
            "history" => ReplOutcome::Output(self.format_history()),
            _ => self.evaluate(input),
        }
    }

    fn evaluate(&mut self, input: &str) -> ReplOutcome {
        match self.calculator.evaluate(input) {
            Ok(value) => {
                self.history.record_success(input, value);
                ReplOutcome::Output(value.format(self.precision))
            }
            Err(e) => {
                debug!("Evaluation failed: {}", e);
                self.history.record_failure(input, &e.to_string());
                ReplOutcome::Output(format!("Error: {}", e))
            }
        }
    }

    fn format_variables(&self) -> String {
        let variables = self.calculator.variables();
        if variables.is_empty() {
            return "No variables defined".to_string();
        }
        variables
            .iter()
            .map(|(name, value)| format!("{} = {}", name, value.format(self.precision)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_history(&self) -> String {
        if self.history.is_empty() {
            return "History is empty".to_string();
        }
        self.history
            .entries()
            .enumerate()
            .map(|(i, entry)| format!("{:>3}  {}", i + 1, entry.display_line(self.precision)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn help_text() -> String {
    let operators: Vec<String> = Operation::ALL
        .iter()
        .map(|op| format!("{} ({})", op.symbol(), op.name()))
        .collect();
    let constants: Vec<&str> = CONSTANTS.iter().map(|(name, _)| *name).collect();

    format!(
        "Operators: {}\n\
         Functions: {}\n\
         Constants: {}, ans\n\
         Assign with: name = expression\n\
         Commands: clear, reset, vars, history, help, exit",
        operators.join(", "),
        FUNCTIONS.join(", "),
        constants.join(", ")
    )
}

/// Run the interactive prompt until `exit`
pub fn run_repl(project_root: &Path, config: &Config) -> Result<(), CalcError> {
    let history = open_history(project_root, config)?;
    let calculator = Calculator::new(config.numbers.mode);
    let mut repl = Repl::new(calculator, history, config.display.precision);

    info!("Starting interactive session in {} mode", config.numbers.mode);
    println!("arith: type an expression, 'help' for commands, 'exit' to quit");

    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt(config.repl.prompt.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CalcError::Prompt(e.to_string()))?;

        match repl.handle_line(&line) {
            ReplOutcome::Output(text) => println!("{}", text),
            ReplOutcome::Silent => continue,
            ReplOutcome::Exit => break,
        }

        repl.history().save()?;
    }

    repl.history().save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn repl() -> Repl {
        Repl::new(Calculator::default(), HistoryManager::new(50), 10)
    }

    fn output(outcome: ReplOutcome) -> String {
        match outcome {
            ReplOutcome::Output(text) => text,
            other => panic!("Expected output, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluates_expressions() {
        let mut repl = repl();
        assert_eq!(output(repl.handle_line("1 + 2")), "3");
        assert_eq!(output(repl.handle_line("ans / 2")), "1.5");
        assert_eq!(repl.history().len(), 2);
    }

    #[test]
    fn test_error_keeps_session_alive() {
        let mut repl = repl();
        assert_eq!(output(repl.handle_line("1 / 0")), "Error: Division by zero");
        assert_eq!(output(repl.handle_line("2 * 2")), "4");
        assert_eq!(repl.history().len(), 2);
    }

    #[test]
    fn test_blank_line_is_silent() {
        let mut repl = repl();
        assert_eq!(repl.handle_line("   "), ReplOutcome::Silent);
        assert!(repl.history().is_empty());
    }

    #[test]
    fn test_exit_commands() {
        let mut repl = repl();
        assert_eq!(repl.handle_line("exit"), ReplOutcome::Exit);
        assert_eq!(repl.handle_line(" quit "), ReplOutcome::Exit);
    }

    #[test]
    fn test_clear_keeps_variables() {
        let mut repl = repl();
        repl.handle_line("x = 5");
        repl.handle_line("clear");
        assert_eq!(repl.calculator().answer(), Value::Integer(0));
        assert_eq!(output(repl.handle_line("vars")), "x = 5");
    }

    #[test]
    fn test_reset_forgets_variables_but_keeps_history() {
        let mut repl = repl();
        repl.handle_line("x = 5");
        assert_eq!(output(repl.handle_line("reset")), "Session reset");
        assert_eq!(output(repl.handle_line("vars")), "No variables defined");
        assert_eq!(repl.calculator().answer(), Value::Integer(0));
        assert_eq!(output(repl.handle_line("history")), "  1  x = 5 = 5");
    }

    #[test]
    fn test_history_listing() {
        let mut repl = repl();
        repl.handle_line("2 * 3");
        repl.handle_line("1 / 0");
        let listing = output(repl.handle_line("history"));
        assert_eq!(
            listing,
            "  1  2 * 3 = 6\n  2  1 / 0 -> error: Division by zero"
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let mut repl = repl();
        let help = output(repl.handle_line("help"));
        assert!(help.contains("^ (power)"));
        assert!(help.contains("sqrt"));
        assert!(help.contains("exit"));
    }
}
