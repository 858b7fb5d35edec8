//! Scripted executor shared by unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::command::{CommandError, CommandExecutor, CommandOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Answers commands from a table keyed by `"<program> <args...>"` and records
/// every call. Unknown commands fail as if the program did not exist.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<String, Result<CommandOutput, CommandError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_command(
        mut self,
        program: &str,
        args: &[&str],
        response: Result<CommandOutput, CommandError>,
    ) -> Self {
        let key = format!("{} {}", program, args.join(" "));
        self.responses.insert(key, response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        let key = format!("{} {}", program, args.join(" "));
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or(Err(CommandError::CommandNotFound {
                command: program.to_string(),
            }))
    }
}

pub fn ok(stdout: &str) -> Result<CommandOutput, CommandError> {
    Ok(CommandOutput {
        status_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

pub fn exit(status_code: i32, stdout: &str, stderr: &str) -> Result<CommandOutput, CommandError> {
    Ok(CommandOutput {
        status_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}
