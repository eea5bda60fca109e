use std::io;

use thiserror::Error;

pub mod launcher;
pub mod stack;
pub mod status;

pub use launcher::{CloneLauncher, Launch, COMMAND_NOT_FOUND};
pub use stack::{ExecutionStack, StackAccounting, DEFAULT_STACK_SIZE, MIN_STACK_SIZE};
pub use status::{wait_for, TerminationResult, FALLBACK_STATUS};

/// Failures on the parent's side of starting or reaping a child. A program
/// that cannot be found is not one of these; the child reports that itself.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("stack size {requested} is below the minimum of {minimum} bytes")]
    StackTooSmall { requested: usize, minimum: usize },
    #[error("stack allocation: {0}")]
    StackAllocation(#[source] io::Error),
    #[error("clone: {0}")]
    Clone(#[source] io::Error),
    #[error("waitpid: {0}")]
    Wait(#[source] io::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
