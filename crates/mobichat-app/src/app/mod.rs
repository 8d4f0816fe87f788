// Application runtime modes
pub mod repl;

pub use repl::run_repl_mode;
