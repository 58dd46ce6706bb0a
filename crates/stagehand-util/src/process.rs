use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::errors::StagehandError;

/// Builder for constructing and executing external processes (`javac`,
/// `javadoc`, `gpg`).
///
/// Provides a fluent API for setting program, arguments, environment
/// variables, working directory, and bytes to feed on stdin.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<String>,
    stdin_data: Option<Vec<u8>>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
            stdin_data: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Feed the given bytes to the child's stdin. Key material is passed this
    /// way so it never touches the filesystem.
    pub fn stdin_data(mut self, data: Vec<u8>) -> Self {
        self.stdin_data = Some(data);
        self
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, StagehandError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(Path::new(dir));
        }

        match self.stdin_data {
            None => cmd.output().map_err(StagehandError::from),
            Some(ref data) => {
                cmd.stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let mut child = cmd.spawn().map_err(StagehandError::from)?;
                child
                    .stdin
                    .take()
                    .expect("stdin was requested")
                    .write_all(data)
                    .map_err(StagehandError::from)?;
                child.wait_with_output().map_err(StagehandError::from)
            }
        }
    }
}
