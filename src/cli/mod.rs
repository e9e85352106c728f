pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, OutputFormatArg};
pub use output::{Listing, OutputFormat, OutputFormatter};
