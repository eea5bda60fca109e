use std::fmt;
use std::io;

use libc::{c_int, pid_t};

use super::ProcessError;

/// Status reported when the child's exit code cannot be determined.
pub const FALLBACK_STATUS: i32 = 1;

/// How a reaped child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationResult {
    Exited(i32),
    Signaled(i32),
}

impl TerminationResult {
    pub fn from_wait_status(status: c_int) -> Self {
        if libc::WIFEXITED(status) {
            TerminationResult::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            TerminationResult::Signaled(libc::WTERMSIG(status))
        } else {
            // Stopped/continued states are not requested from waitpid, so
            // whatever this is carries no usable exit code.
            TerminationResult::Signaled(0)
        }
    }

    /// Exit status as the shell reports it. A signal is not encoded.
    pub fn exit_code(&self) -> i32 {
        match self {
            TerminationResult::Exited(code) => *code,
            TerminationResult::Signaled(_) => FALLBACK_STATUS,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, TerminationResult::Exited(0))
    }
}

impl fmt::Display for TerminationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationResult::Exited(code) => write!(f, "exited with status {}", code),
            TerminationResult::Signaled(sig) => write!(f, "terminated by signal {}", sig),
        }
    }
}

/// Blocks until `pid` terminates. There is no timeout; an interrupted wait
/// is resumed, any other failure is returned.
pub fn wait_for(pid: pid_t) -> Result<TerminationResult, ProcessError> {
    let mut status: c_int = 0;
    loop {
        // SAFETY: status points to a live c_int for the duration of the call.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            return Ok(TerminationResult::from_wait_status(status));
        }

        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            continue;
        }
        return Err(ProcessError::Wait(err));
    }
}
