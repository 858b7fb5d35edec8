use std::path::PathBuf;
use thiserror::Error;

use super::repo::Repo;
use crate::external::CommandError;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("{} is not a git repository", .0.display())]
    NotARepository(PathBuf),
    #[error("git init failed in {}: {}", .repo.path().display(), .stderr.trim())]
    InitFailed { repo: Repo, stderr: String },
    #[error("git {command} exited with status {status}: {}", .stderr.trim())]
    CommandFailed {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },
    #[error("Command execution error: {source}")]
    Command {
        #[from]
        source: CommandError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Buffered standard output of the failed process, if one ran.
    pub fn stdout(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { stdout, .. } => Some(stdout),
            _ => None,
        }
    }

    /// Buffered standard error of the failed process, if one ran.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { stderr, .. } | GitError::InitFailed { stderr, .. } => {
                Some(stderr)
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<i32> {
        match self {
            GitError::CommandFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
