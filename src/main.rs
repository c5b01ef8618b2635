use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use arith::commands::{init_config, run_calc, run_eval, run_repl, show_history};
use arith::core::load_config;
use arith::models::{NumberMode, Operation};
use arith::CalcError;

/// arith - checked arithmetic and expression calculator
#[derive(Parser)]
#[command(name = "arith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the number of fractional digits shown
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Override the number mode
    #[arg(long, global = true, value_enum)]
    mode: Option<NumberMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one operation to two numbers (e.g. `arith calc div 1 4`)
    Calc {
        /// add, sub, mul, div, mod, pow (or + - * / % ^)
        #[arg(allow_hyphen_values = true)]
        operation: Operation,

        /// Left operand
        #[arg(allow_hyphen_values = true)]
        lhs: String,

        /// Right operand
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },

    /// Evaluate one or more expressions in a single session
    Eval {
        /// Expressions such as "x = 2" "x ^ 10"
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,

        /// Print each result as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session
    Repl,

    /// Show the persisted history
    History {
        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },

    /// Create arith.toml in the current directory
    Init {
        /// Overwrite an existing arith.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so results on stdout stay machine-readable
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CalcError> {
    let project_root = std::env::current_dir()?;

    if let Commands::Init { force } = cli.command {
        init_config(&project_root, cli.mode, force)?;
        return Ok(());
    }

    let config = load_config(&project_root, cli.precision, cli.mode)?;

    match cli.command {
        Commands::Calc {
            operation,
            lhs,
            rhs,
        } => {
            let result = run_calc(&config, operation, &lhs, &rhs)?;
            println!("{}", result);
            Ok(())
        }

        Commands::Eval { expressions, json } => {
            run_eval(&project_root, &config, &expressions, json)
        }

        Commands::Repl => run_repl(&project_root, &config),

        Commands::History { clear } => show_history(&project_root, &config, clear),

        Commands::Init { .. } => Ok(()),
    }
}
