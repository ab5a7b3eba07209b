//! CLI command handlers. Each command is in its own file.

mod completions;
mod generate;
mod options_file;
mod request;
mod validate;

pub use completions::run_completions;
pub use generate::{run_generate, GenerateArgs};
pub use request::run_request;
pub use validate::run_validate;
