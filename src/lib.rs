//! A minimal line shell that starts every external program with `clone(2)`
//! on a stack it maps itself, waits for it, and reports how long it ran.
//!
//! Linux only: the launcher calls `clone`, `execvp` and `waitpid` directly.

pub mod error;
pub mod flags;
pub mod shell;

pub mod core;
pub mod highlight;
pub mod input;
pub mod process;
