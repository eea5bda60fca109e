use std::path::Path;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

/// `cd <path>`. No home-directory default and no `~` expansion.
#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        let path = args.first().ok_or(CommandError::MissingArgument("cd"))?;

        state
            .change_dir(Path::new(path))
            .map_err(|source| CommandError::ChangeDirectory {
                path: path.clone(),
                source,
            })?;
        Ok(Flow::Continue)
    }
}
