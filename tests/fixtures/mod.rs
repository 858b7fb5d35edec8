#![allow(dead_code)]

use anyhow::Result;
/// Temporary git repositories for integration tests
use gitshim::{init, Repo};
use std::path::Path;
use tempfile::TempDir;

/// A freshly initialized repository inside its own temporary directory
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repo,
}

impl TestRepo {
    /// `git init` plus the identity and settings tests rely on
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let opened = init(dir.path()).await?;
        setup_git_config(&opened.repo).await?;
        Ok(Self {
            dir,
            repo: opened.repo,
        })
    }

    /// A repository with one commit on its default branch
    pub async fn with_commit() -> Result<Self> {
        let test_repo = Self::new().await?;
        test_repo.commit_file("README.md", "# test\n", "Initial commit").await?;
        Ok(test_repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let file_path = self.path().join(relative_path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file_path, content)?;
        Ok(())
    }

    pub async fn commit_file(&self, relative_path: &str, content: &str, message: &str) -> Result<()> {
        self.write_file(relative_path, content)?;
        self.repo.add([relative_path]).await?;
        self.repo.commit(message).await?;
        Ok(())
    }

    /// Subject line of the latest commit
    pub async fn last_subject(&self) -> Result<String> {
        let output = self.repo.run("log -1 --format=%s", &[] as &[&str]).await?;
        Ok(output.stdout.trim().to_string())
    }
}

/// Set up basic Git configuration for testing
pub async fn setup_git_config(repo: &Repo) -> Result<()> {
    let settings = [
        ("user.name", "Test User"),
        ("user.email", "test@example.com"),
        ("commit.gpgsign", "false"),
        ("clean.requireForce", "false"),
    ];
    for (key, value) in settings {
        repo.run("config ? ?", &[key, value]).await?;
    }
    Ok(())
}
