mod sequencer;
mod tokenizer;

pub use sequencer::{split_statements, truncate_line, STATEMENT_SEPARATOR};
pub use tokenizer::{tokenize, ArgumentVector, TOKEN_SEPARATORS};

/// Capacity of the original argument array, terminator slot included.
pub const DEFAULT_MAX_ARGS: usize = 64;

/// Input buffer size, terminator included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Capacity policy for one line: `max_args - 1` tokens per command (one slot
/// is the terminator) and `max_args` statements per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_args: usize,
    pub max_line_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_args: DEFAULT_MAX_ARGS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl Limits {
    pub fn max_tokens(&self) -> usize {
        self.max_args.saturating_sub(1)
    }

    pub fn max_statements(&self) -> usize {
        self.max_args
    }
}
