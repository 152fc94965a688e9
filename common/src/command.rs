use serde::Deserialize;
use std::{
    ffi::{OsStr, OsString},
    process::{ExitStatus, Stdio},
};

/// Placeholder replaced by the target path or url.
pub const TARGET_PATTERN: &str = "%p";

/// An external program invoked with a single target, e.g. `["zathura", "%p"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub cmd: String,
    pub args: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to start '{cmd}'")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{cmd}' exited with status: {status}")]
    Status { cmd: String, status: ExitStatus },
}

impl Command {
    pub fn new(cmd: String, args: Vec<String>) -> Self {
        Self { cmd, args }
    }

    /// Build the process for `target`. If no argument contains the placeholder, the target is
    /// appended as the last argument.
    pub fn new_command(&self, target: &OsStr) -> std::process::Command {
        let mut command = std::process::Command::new(&self.cmd);
        let mut substituted = false;
        for arg in &self.args {
            if arg.contains(TARGET_PATTERN) {
                substituted = true;
                command.arg(substitute(arg, target));
            } else {
                command.arg(arg);
            }
        }
        if !substituted {
            command.arg(target);
        }
        command
    }

    /// Run the program on `target` and wait for it to exit.
    pub fn run(&self, target: &OsStr) -> Result<ExitStatus, Error> {
        tracing::debug!(cmd = %self.cmd, target = ?target, "Running external command");
        let status = self
            .new_command(target)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                cmd: self.cmd.clone(),
                source,
            })?;

        match status.success() {
            true => Ok(status),
            false => Err(Error::Status {
                cmd: self.cmd.clone(),
                status,
            }),
        }
    }
}

fn substitute(arg: &str, target: &OsStr) -> OsString {
    let mut out = OsString::new();
    let mut parts = arg.split(TARGET_PATTERN);
    if let Some(first) = parts.next() {
        out.push(first);
    }
    for part in parts {
        out.push(target);
        out.push(part);
    }
    out
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.cmd)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Vec::<String>::deserialize(deserializer)?;
        let (cmd, args) = vec
            .split_first()
            .ok_or(serde::de::Error::custom("Expected at least one element"))?;

        Ok(Self::new(cmd.to_owned(), args.to_vec()))
    }
}
