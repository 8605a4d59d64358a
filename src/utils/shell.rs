use std::env;
use std::fmt;
use std::fs;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::errors::LvgError;

#[derive(Debug, Error)]
pub enum CmdError {
    #[error("failed to spawn: {error}")]
    ErrSpawn { error: std::io::Error },

    #[error("terminated by signal")]
    ErrSignal,

    #[error("exited with non-zero status {code}: {output}")]
    ErrExit { code: i32, output: String },
}

/// A program and its arguments, kept apart so that no shell
/// ever gets to re-split device paths or names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
}

impl Cmd {
    pub fn new(program: &str) -> Self {
        Cmd {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

/// Runs `cmd` to completion and returns its stdout.
///
/// Non-zero exits carry stderr (or stdout, if stderr was empty)
/// so that callers can surface the command's own diagnostics.
pub fn exec(cmd: &Cmd) -> Result<String, LvgError> {
    debug!("executing command: '{cmd}'");

    let output = Command::new(&cmd.program)
        .args(&cmd.args)
        .output()
        .map_err(|err| LvgError::CmdFailed {
            error: CmdError::ErrSpawn { error: err },
            context: format!("command {} failed to spawn", cmd.program),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    match output.status.code() {
        Some(0) => Ok(stdout),

        Some(code) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let output = match stderr.is_empty() {
                true => stdout.trim().to_string(),
                false => stderr,
            };

            Err(LvgError::CmdFailed {
                error: CmdError::ErrExit { code, output },
                context: format!("command '{cmd}' failed"),
            })
        }

        None => Err(LvgError::CmdFailed {
            error: CmdError::ErrSignal,
            context: format!("command '{cmd}' failed"),
        }),
    }
}

pub fn in_path(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{}/{}", p, program);
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }

    false
}
