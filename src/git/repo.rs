//! Repository handle
//!
//! A [`Repo`] is a path plus the means to run `git` inside it. Every method
//! spawns exactly one process and awaits it; nothing is cached, retried or
//! timed out, and calls against the same working tree are not serialised.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn, Instrument};

use super::error::GitError;
use super::parse::{parse_branches, parse_current_branch, parse_remotes, Branch};
use crate::external::{CommandExecutor, CommandOutput, ProcessCommandExecutor};
use crate::telemetry::{create_command_span, generate_correlation_id};
use crate::template::{CommandTemplate, GitCommand};

pub const DEFAULT_GIT_PROGRAM: &str = "git";

#[derive(Clone)]
pub struct Repo {
    path: PathBuf,
    program: Arc<str>,
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repo")
            .field("path", &self.path)
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl Repo {
    /// Bind a handle to `path` using the system `git`.
    ///
    /// The path is made absolute against the current directory but is not
    /// checked for existence; use [`open`](super::open) for that.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, GitError> {
        Self::with_executor(path, Arc::new(ProcessCommandExecutor), DEFAULT_GIT_PROGRAM)
    }

    pub fn with_executor<P: AsRef<Path>>(
        path: P,
        executor: Arc<dyn CommandExecutor>,
        program: &str,
    ) -> Result<Self, GitError> {
        Ok(Self {
            path: std::path::absolute(path.as_ref())?,
            program: Arc::from(program),
            executor,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn execute(&self, operation: &str, command: GitCommand) -> Result<CommandOutput, GitError> {
        let correlation_id = generate_correlation_id();
        let span = create_command_span(operation, &self.path, Some(&correlation_id));

        async move {
            debug!(command = %command, "running git");

            let output = self
                .executor
                .execute(&self.program, command.args(), &self.path)
                .await
                .inspect_err(|e| warn!(error = %e, "failed to spawn git"))?;

            if !output.success() {
                warn!(
                    status = output.status_code,
                    stderr = output.stderr.trim(),
                    "git command failed"
                );
                return Err(GitError::CommandFailed {
                    command: command.to_string(),
                    status: output.status_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                });
            }

            Ok(output)
        }
        .instrument(span)
        .await
    }

    /// Run an arbitrary template, e.g. `run("config ? ?", &["user.name", "Bob"])`.
    ///
    /// Each value stays a single argument, so no quoting is needed.
    pub async fn run<S: AsRef<str>>(&self, template: &str, args: &[S]) -> Result<CommandOutput, GitError> {
        let template = CommandTemplate::new(template);
        let command = template.to_command(args);
        let operation = command.subcommand().unwrap_or("run").to_string();
        self.execute(&operation, command).await
    }

    /// `git add <file>...`
    pub async fn add<I, S>(&self, files: I) -> Result<CommandOutput, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut command = GitCommand::new(["add"]);
        for file in files {
            command.push(file.as_ref());
        }
        self.execute("add", command).await
    }

    /// `git commit -v -m <message>`
    pub async fn commit(&self, message: &str) -> Result<CommandOutput, GitError> {
        let command = CommandTemplate::new("commit -v -m ?").to_command(&[message]);
        self.execute("commit", command).await
    }

    /// `git commit -av -m <message>`
    pub async fn commit_all(&self, message: &str) -> Result<CommandOutput, GitError> {
        let command = CommandTemplate::new("commit -av -m ?").to_command(&[message]);
        self.execute("commit", command).await
    }

    /// `git clone --local <this repo> <target>`, returning a handle on the clone.
    ///
    /// A relative `target` is taken relative to this repository, which is
    /// where git runs.
    pub async fn clone_to<P: AsRef<Path>>(&self, target: P) -> Result<Repo, GitError> {
        let target = self.path.join(target.as_ref());
        let source = self.path.to_string_lossy();
        let destination = target.to_string_lossy();

        let command = CommandTemplate::new("clone --local ? ?").to_command(&[&*source, &*destination]);
        self.execute("clone", command).await?;

        Repo::with_executor(target, Arc::clone(&self.executor), &self.program)
    }

    /// `git clean`, with `-d` when `dirs` is set.
    pub async fn clean(&self, dirs: bool) -> Result<CommandOutput, GitError> {
        let template = if dirs { "clean -d" } else { "clean" };
        self.execute("clean", CommandTemplate::new(template).to_command::<&str>(&[]))
            .await
    }

    async fn branch_output(&self) -> Result<String, GitError> {
        let output = self
            .execute("branch", GitCommand::new(["branch"]))
            .await?;
        Ok(output.stdout)
    }

    /// Local branches with the checked-out one flagged.
    pub async fn list_branches(&self) -> Result<Vec<Branch>, GitError> {
        Ok(parse_branches(&self.branch_output().await?))
    }

    pub async fn list_branch_names(&self) -> Result<Vec<String>, GitError> {
        Ok(self
            .list_branches()
            .await?
            .into_iter()
            .map(|branch| branch.name)
            .collect())
    }

    /// Name of the checked-out branch. `None` when git marks no branch, as in
    /// a repository without commits.
    pub async fn current_branch(&self) -> Result<Option<String>, GitError> {
        Ok(parse_current_branch(&self.branch_output().await?))
    }

    pub async fn list_remotes(&self) -> Result<Vec<String>, GitError> {
        let output = self.execute("remote", GitCommand::new(["remote"])).await?;
        Ok(parse_remotes(&output.stdout))
    }

    pub async fn remote_exists(&self, name: &str) -> Result<bool, GitError> {
        Ok(self.list_remotes().await?.iter().any(|remote| remote == name))
    }

    /// `git branch <name>`
    pub async fn create_branch(&self, name: &str) -> Result<CommandOutput, GitError> {
        let command = CommandTemplate::new("branch ?").to_command(&[name]);
        self.execute("branch", command).await
    }

    /// `git branch -d <name>`, or `-D` when `force` is set.
    pub async fn delete_branch(&self, name: &str, force: bool) -> Result<CommandOutput, GitError> {
        let flag = if force { "D" } else { "d" };
        let command = CommandTemplate::new("branch -? ?").to_command(&[flag, name]);
        self.execute("branch", command).await
    }

    /// `git checkout <name>`
    pub async fn checkout(&self, name: &str) -> Result<CommandOutput, GitError> {
        let command = CommandTemplate::new("checkout ?").to_command(&[name]);
        self.execute("checkout", command).await
    }
}
