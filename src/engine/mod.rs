//! Engine module: CLI parsing, command handling, path tools, progress

pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, run};
pub use tools::{
    child_url, containing_dir, matches_extension, relative_manifest_path, render_template,
};
