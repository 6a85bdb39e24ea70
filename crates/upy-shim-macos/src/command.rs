// crates/upy-shim-macos/src/command.rs

use log::{debug, trace};
use std::process::Command;
use upy_shim::{CommandRunner, ShimError};

/// Runs commands through `sh -c`, like `os.popen` does.
///
/// Pipelines (`ifconfig en0 | awk ...`) are part of the command string, so
/// [`CommandRunner::run`] needs a shell. [`CommandRunner::run_program`]
/// spawns the program directly and never involves one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) -> Result<String, ShimError> {
        debug!("Running `{}`", command);
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| ShimError::CommandFailed(format!("{}: {}", command, e)))?;

        // Exit status is not checked: the caller interprets stdout.
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("`{}` exited with {} and printed {:?}", command, output.status, stdout);
        Ok(stdout)
    }

    fn run_program(&mut self, program: &str, args: &[&str]) -> Result<String, ShimError> {
        debug!("Running {} with {} argument(s)", program, args.len());
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ShimError::CommandFailed(format!("{}: {}", program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("{} exited with {} and printed {:?}", program, output.status, stdout);
        Ok(stdout)
    }
}
