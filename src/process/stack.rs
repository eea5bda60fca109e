use std::ffi::c_void;
use std::io;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::trace;

use super::ProcessError;

/// Stack size the launcher uses when nothing else is configured.
pub const DEFAULT_STACK_SIZE: usize = 1024 * 1024;

/// Anything smaller cannot hold the child's frames up to `execvp`.
pub const MIN_STACK_SIZE: usize = 64 * 1024;

static ACQUIRED: AtomicUsize = AtomicUsize::new(0);
static RELEASED: AtomicUsize = AtomicUsize::new(0);

/// Process-wide count of stack regions mapped and unmapped so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackAccounting {
    pub acquired: usize,
    pub released: usize,
}

impl StackAccounting {
    pub fn snapshot() -> Self {
        Self {
            acquired: ACQUIRED.load(Ordering::SeqCst),
            released: RELEASED.load(Ordering::SeqCst),
        }
    }

    pub fn live(&self) -> usize {
        self.acquired.saturating_sub(self.released)
    }
}

/// Anonymous private mapping handed to `clone(2)` as the child's stack.
///
/// The region is unmapped exactly once, when the value is dropped. The
/// launcher keeps it alive until the child has been reaped, so every exit
/// path (creation failure, wait failure, normal completion) releases it.
#[derive(Debug)]
pub struct ExecutionStack {
    base: NonNull<c_void>,
    size: usize,
}

impl ExecutionStack {
    pub fn acquire(size: usize) -> Result<Self, ProcessError> {
        if size < MIN_STACK_SIZE {
            return Err(ProcessError::StackTooSmall {
                requested: size,
                minimum: MIN_STACK_SIZE,
            });
        }

        // SAFETY: anonymous mapping with no address hint; the result is checked
        // against MAP_FAILED before use.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_STACK,
                -1,
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(ProcessError::StackAllocation(io::Error::last_os_error()));
        }
        let base = NonNull::new(addr)
            .ok_or_else(|| ProcessError::StackAllocation(io::Error::from(io::ErrorKind::OutOfMemory)))?;

        ACQUIRED.fetch_add(1, Ordering::SeqCst);
        trace!("mapped {} byte execution stack at {:p}", size, addr);

        Ok(Self { base, size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Highest address of the region. Stacks grow down on every Linux
    /// target, so this is what `clone` expects. The mapping is page aligned,
    /// which satisfies the 16 byte ABI alignment.
    pub fn top(&self) -> *mut c_void {
        // SAFETY: base + size is one past the end of the same mapping.
        unsafe { self.base.as_ptr().cast::<u8>().add(self.size).cast() }
    }
}

impl Drop for ExecutionStack {
    fn drop(&mut self) {
        // SAFETY: base/size describe a mapping created in `acquire` and not
        // unmapped anywhere else.
        let rc = unsafe { libc::munmap(self.base.as_ptr(), self.size) };
        if rc != 0 {
            log::warn!(
                "munmap of execution stack failed: {}",
                io::Error::last_os_error()
            );
        }
        RELEASED.fetch_add(1, Ordering::SeqCst);
        trace!("released execution stack at {:p}", self.base.as_ptr());
    }
}
