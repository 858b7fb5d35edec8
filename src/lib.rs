// gitshim - async wrapper around the git command line
// This exposes the core components for the CLI and for embedding

pub mod config;
pub mod external;
pub mod git;
pub mod telemetry;
pub mod template;

// Re-export key types for easy access
pub use crate::config::GitshimConfig;
pub use external::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use git::{init, init_with, is_repository, open, open_with, Branch, GitError, Opened, Repo};
pub use telemetry::{create_command_span, generate_correlation_id, init_telemetry};
pub use template::{substitute, CommandTemplate, GitCommand, PLACEHOLDER};
