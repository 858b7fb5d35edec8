//! Git operations module
//!
//! Every operation shells out to the `git` binary inside the repository's
//! working tree and parses its plain-text output where there is something to
//! parse.

pub mod discovery;
pub mod error;
pub mod parse;
pub mod repo;

pub use discovery::{init, init_with, is_repository, open, open_with, Opened, REPOSITORY_MARKER};
pub use error::GitError;
pub use parse::Branch;
pub use repo::{Repo, DEFAULT_GIT_PROGRAM};
