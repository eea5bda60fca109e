use thiserror::Error;

use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Flag error: {0}")]
    FlagError(String),
    #[error("Ctrl-C error: {0}")]
    CtrlC(String),
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_errors_keep_their_text() {
        let err: ShellError = CommandError::MissingArgument("cd").into();
        assert_eq!(err.to_string(), "cd: missing argument");
    }

    #[test]
    fn test_process_errors_keep_their_text() {
        let err: ShellError =
            ProcessError::Clone(std::io::Error::from_raw_os_error(libc::EAGAIN)).into();
        assert!(err.to_string().starts_with("clone: "));
    }
}
