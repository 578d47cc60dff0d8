pub mod cli;

pub use cli::Command;
