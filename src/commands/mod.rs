pub mod calc;
pub mod eval;
pub mod history;
pub mod init;
pub mod repl;

pub use calc::*;
pub use eval::*;
pub use history::*;
pub use init::*;
pub use repl::*;
