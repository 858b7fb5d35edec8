//! Opening and creating repositories.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::error::GitError;
use super::repo::{Repo, DEFAULT_GIT_PROGRAM};
use crate::external::{CommandExecutor, ProcessCommandExecutor};

/// Directory whose presence marks an initialized repository.
pub const REPOSITORY_MARKER: &str = ".git";

/// A handle returned by [`open`] or [`init`].
#[derive(Debug, Clone)]
pub struct Opened {
    pub repo: Repo,
    /// Whether `git init` ran to produce this handle.
    pub created: bool,
}

/// True when `path` contains a `.git` directory. A `.git` file, as used by
/// worktrees and submodules, does not count.
pub async fn is_repository<P: AsRef<Path>>(path: P) -> bool {
    tokio::fs::metadata(path.as_ref().join(REPOSITORY_MARKER))
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}

/// Open the repository at `path`, running `git init` first when it is
/// missing and `auto_create` is set.
pub async fn open<P: AsRef<Path>>(path: P, auto_create: bool) -> Result<Opened, GitError> {
    open_with(path, auto_create, Arc::new(ProcessCommandExecutor), DEFAULT_GIT_PROGRAM).await
}

pub async fn open_with<P: AsRef<Path>>(
    path: P,
    auto_create: bool,
    executor: Arc<dyn CommandExecutor>,
    program: &str,
) -> Result<Opened, GitError> {
    let path = std::path::absolute(path.as_ref())?;

    if is_repository(&path).await {
        return Ok(Opened {
            repo: Repo::with_executor(&path, executor, program)?,
            created: false,
        });
    }

    if !auto_create {
        return Err(GitError::NotARepository(path));
    }

    init_with(&path, executor, program).await
}

/// Run `git init` in `path`, creating the directory if needed.
pub async fn init<P: AsRef<Path>>(path: P) -> Result<Opened, GitError> {
    init_with(path, Arc::new(ProcessCommandExecutor), DEFAULT_GIT_PROGRAM).await
}

pub async fn init_with<P: AsRef<Path>>(
    path: P,
    executor: Arc<dyn CommandExecutor>,
    program: &str,
) -> Result<Opened, GitError> {
    let repo = Repo::with_executor(path, executor, program)?;
    tokio::fs::create_dir_all(repo.path()).await?;

    match repo.run::<&str>("init", &[]).await {
        Ok(_) => {
            info!(path = %repo.path().display(), "initialized git repository");
            Ok(Opened { repo, created: true })
        }
        Err(GitError::CommandFailed { stderr, .. }) => Err(GitError::InitFailed { repo, stderr }),
        Err(e) => Err(e),
    }
}
