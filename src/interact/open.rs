//! Opening tool URLs in the user's browser

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Opens a URL in a new browsing context
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Uses the platform's default URL handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };
        command.arg(url);
        spawn_detached(command, url)
    }
}

/// Runs a user-configured program with the URL as its only argument
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl UrlOpener for CommandOpener {
    fn open(&self, url: &str) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.arg(url);
        spawn_detached(command, url)
    }
}

/// Does nothing, for `--no-open` and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpOpener;

impl UrlOpener for NoOpOpener {
    fn open(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}

fn spawn_detached(mut command: Command, url: &str) -> Result<()> {
    let program = command.get_program().to_string_lossy().into_owned();
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch '{}' to open {}", program, url))?;
    debug!(program = %program, url, "Launched URL handler");
    Ok(())
}
