use std::collections::BTreeMap;
use std::io;

use thiserror::Error;

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

use crate::core::state::ShellState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("cd: {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// What the read loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command that has to run inside the shell process.
pub trait Command {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state),
            CommandType::Exit(cmd) => cmd.execute(args, state),
        }
    }
}

#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        Self { commands }
    }

    /// Runs `name` if it is a builtin. `None` means it is not one and the
    /// caller should start an external program instead.
    pub fn dispatch(
        &self,
        name: &str,
        args: &[String],
        state: &mut ShellState,
    ) -> Option<Result<Flow, CommandError>> {
        self.commands
            .get(name)
            .map(|cmd| cmd.execute(args, state))
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_builtin_command_detection() {
        let builtins = Builtins::new();

        assert!(builtins.is_builtin("cd"));
        assert!(builtins.is_builtin("exit"));
        assert!(!builtins.is_builtin("ls"));
        assert!(!builtins.is_builtin(""));
        assert!(!builtins.is_builtin("CD"));
        assert_eq!(builtins.names().collect::<Vec<_>>(), ["cd", "exit"]);
    }

    #[test]
    #[serial]
    fn test_unknown_falls_through() {
        let builtins = Builtins::new();
        let mut state = ShellState::new().unwrap();
        assert!(builtins.dispatch("echo", &[], &mut state).is_none());
    }

    #[test]
    #[serial]
    fn test_dispatch_cd() {
        let builtins = Builtins::new();
        let mut state = ShellState::new().unwrap();
        let before = env::current_dir().unwrap();

        let result = builtins.dispatch("cd", &[".".to_string()], &mut state);
        assert!(matches!(result, Some(Ok(Flow::Continue))));
        assert_eq!(env::current_dir().unwrap(), before);

        let result = builtins.dispatch("cd", &[], &mut state);
        assert!(matches!(result, Some(Err(CommandError::MissingArgument(_)))));
    }

    #[test]
    #[serial]
    fn test_dispatch_exit() {
        let builtins = Builtins::new();
        let mut state = ShellState::new().unwrap();
        assert!(matches!(
            builtins.dispatch("exit", &[], &mut state),
            Some(Ok(Flow::Exit))
        ));
    }

    #[test]
    fn test_command_error_display() {
        assert_eq!(
            CommandError::MissingArgument("cd").to_string(),
            "cd: missing argument"
        );
        let err = CommandError::ChangeDirectory {
            path: "/nope".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "cd: /nope: No such file or directory");
    }
}
