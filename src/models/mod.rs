pub mod config;
pub mod history;
pub mod mode;
pub mod operation;
pub mod value;

pub use config::*;
pub use history::*;
pub use mode::*;
pub use operation::*;
pub use value::*;
