//! Blocking subprocess invocation for the external tools (`psql`, `curl`, `git`).

use crate::errors::{AppError, AppResult};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Run `program args...` (optionally inside `cwd`) and capture its output.
/// Only a failure to start the process is an error; exit codes are returned.
pub fn run<I, S>(program: &str, args: I, cwd: Option<&Path>) -> AppResult<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!(program, cwd = ?cwd, "spawning");

    let output = cmd
        .output()
        .map_err(|e| AppError::Spawn(program.to_string(), e))?;
    let out = ProcessOutput::from_output(output);

    tracing::debug!(program, code = ?out.code, "finished");
    Ok(out)
}

/// Like [`run`], but a non-zero exit becomes `AppError::Command`.
pub fn run_checked<I, S>(program: &str, args: I, cwd: Option<&Path>) -> AppResult<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let out = run(program, args, cwd)?;
    if out.success() {
        Ok(out)
    } else {
        Err(AppError::Command {
            program: program.to_string(),
            code: out.code,
            stderr: out.stderr.trim().to_string(),
        })
    }
}
