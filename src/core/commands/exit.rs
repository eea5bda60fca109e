use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    /// Arguments are ignored; the shell always leaves with status 0.
    fn execute(&self, _args: &[String], _state: &mut ShellState) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}
