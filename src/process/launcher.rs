use std::ffi::{c_void, CString};
use std::io;

use libc::{c_char, c_int};
use log::debug;

use super::stack::{ExecutionStack, DEFAULT_STACK_SIZE};
use super::status::{wait_for, TerminationResult};
use super::ProcessError;

/// Status a child exits with when `execvp` could not run the program.
pub const COMMAND_NOT_FOUND: c_int = 127;

/// Runs an external program to completion.
pub trait Launch {
    fn launch(&self, argv: &[String]) -> Result<TerminationResult, ProcessError>;
}

/// Everything the child touches between `clone` and `execvp`. Built in the
/// parent so the child only makes async-signal-safe calls.
struct ChildImage {
    _strings: Vec<CString>,
    argv: Vec<*const c_char>,
    not_found: Vec<u8>,
}

impl ChildImage {
    fn new(argv: &[String]) -> Result<Self, ProcessError> {
        let program = argv
            .first()
            .ok_or_else(|| ProcessError::InvalidArgument(String::from("empty argument vector")))?;

        let strings = argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(format!("{:?} contains a NUL byte", arg)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut ptrs: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(std::ptr::null());

        Ok(Self {
            _strings: strings,
            argv: ptrs,
            not_found: format!("Error: command not found: {}\n", program).into_bytes(),
        })
    }
}

extern "C" fn child_main(arg: *mut c_void) -> c_int {
    // SAFETY: `arg` is the ChildImage the parent passed to clone. Without
    // CLONE_VM the child works on its own copy of the parent's memory, so the
    // reference stays valid until exec or exit.
    let image = unsafe { &*(arg as *const ChildImage) };

    // SAFETY: argv is NUL terminated and every entry points into `_strings`.
    unsafe {
        libc::execvp(image.argv[0], image.argv.as_ptr());
        libc::write(
            libc::STDERR_FILENO,
            image.not_found.as_ptr().cast(),
            image.not_found.len(),
        );
    }
    COMMAND_NOT_FOUND
}

/// Starts programs with `clone(2)` on a stack this launcher maps itself.
///
/// Only `SIGCHLD` is passed as the clone flag: the child shares no address
/// space, filesystem information or descriptor table with the shell, it gets
/// copies as with `fork`. The stack mapping is held until `waitpid` returns.
#[derive(Debug, Clone)]
pub struct CloneLauncher {
    stack_size: usize,
    flags: c_int,
}

impl Default for CloneLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}

impl CloneLauncher {
    pub fn new(stack_size: usize) -> Self {
        Self {
            stack_size,
            flags: libc::SIGCHLD,
        }
    }

    pub fn stack_size(&self) -> usize {
        self.stack_size
    }
}

impl Launch for CloneLauncher {
    fn launch(&self, argv: &[String]) -> Result<TerminationResult, ProcessError> {
        let image = ChildImage::new(argv)?;
        let stack = ExecutionStack::acquire(self.stack_size)?;

        // SAFETY: `stack` is a writable mapping of `stack.size()` bytes that
        // outlives the child (dropped only after wait_for), and `image` lives
        // until the end of this function.
        let pid = unsafe {
            libc::clone(
                child_main,
                stack.top(),
                self.flags,
                &image as *const ChildImage as *mut c_void,
            )
        };
        if pid == -1 {
            return Err(ProcessError::Clone(io::Error::last_os_error()));
        }
        debug!("cloned pid {} for {:?}", pid, argv[0]);

        let result = wait_for(pid)?;
        debug!("pid {} {}", pid, result);

        drop(stack);
        Ok(result)
    }
}
