//! External tool abstractions
//!
//! This module provides a trait-based abstraction over spawning external CLI
//! tools, enabling testable code through dependency injection and mock
//! implementations.

pub mod command;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};

#[cfg(test)]
pub use command::MockCommandExecutor;

#[cfg(test)]
pub(crate) mod testing;
