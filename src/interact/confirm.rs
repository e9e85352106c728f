//! Yes/no confirmation for destructive operations

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Asks the user to approve an operation
pub trait Confirmer: Send + Sync {
    /// Returns `true` when the user approves `message`
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Prompts on stdout and reads the answer from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, message: &str) -> Result<bool> {
        print!("{} [y/N] ", message);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_affirmative(&input))
    }
}

/// Approves everything, for `--yes` and scripted use
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Declines everything
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysNo;

impl Confirmer for AlwaysNo {
    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(false)
    }
}

/// `y` or `yes`, any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
