use std::time::{Duration, Instant};

use log::debug;

use crate::core::commands::{Builtins, Flow};
use crate::core::parse::{split_statements, tokenize, truncate_line, Limits, TOKEN_SEPARATORS};
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::process::{CloneLauncher, Launch, FALLBACK_STATUS};

/// Where a statement ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Noop,
    Builtin,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub kind: CommandKind,
    pub status: i32,
    /// Wall-clock time from launch to reaping. Builtins are not timed.
    pub elapsed: Option<Duration>,
    pub flow: Flow,
}

impl CommandOutcome {
    fn noop() -> Self {
        Self {
            kind: CommandKind::Noop,
            status: 0,
            elapsed: None,
            flow: Flow::Continue,
        }
    }
}

/// Statuses of every statement that ran, and whether to keep reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub statuses: Vec<i32>,
    pub flow: Flow,
}

/// Receives what the user gets to see about each statement.
pub trait Report {
    fn timing(&mut self, elapsed: Duration);
    fn error(&mut self, err: &ShellError);
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!(
        "[Execution time: {}.{:06} seconds]",
        elapsed.as_secs(),
        elapsed.subsec_micros()
    )
}

/// Runs statements one at a time: tokenize, try the builtins, otherwise
/// launch and wait. Nothing but `state` survives between calls.
pub struct Executor<L = CloneLauncher> {
    builtins: Builtins,
    launcher: L,
    limits: Limits,
}

impl Executor<CloneLauncher> {
    pub fn new(stack_size: usize, limits: Limits) -> Self {
        Self::with_launcher(CloneLauncher::new(stack_size), limits)
    }
}

impl<L: Launch> Executor<L> {
    pub fn with_launcher(launcher: L, limits: Limits) -> Self {
        Self {
            builtins: Builtins::new(),
            launcher,
            limits,
        }
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs every `;` separated statement of `line` in order. A failing
    /// statement is reported and the next one still runs; only `exit`
    /// stops the line.
    pub fn execute_line(
        &self,
        line: &str,
        state: &mut ShellState,
        report: &mut dyn Report,
    ) -> LineOutcome {
        let line = truncate_line(line, self.limits.max_line_length);
        let mut statuses = Vec::new();

        for statement in split_statements(line, self.limits.max_statements()) {
            let status = match self.execute_command(statement, state) {
                Ok(outcome) => {
                    if let Some(elapsed) = outcome.elapsed {
                        report.timing(elapsed);
                    }
                    if outcome.flow == Flow::Exit {
                        statuses.push(outcome.status);
                        return LineOutcome {
                            statuses,
                            flow: Flow::Exit,
                        };
                    }
                    outcome.status
                }
                Err(err) => {
                    report.error(&err);
                    FALLBACK_STATUS
                }
            };
            statuses.push(status);
        }

        LineOutcome {
            statuses,
            flow: Flow::Continue,
        }
    }

    /// Runs one statement. Errors are usage or resource failures of the
    /// shell itself; a program that fails or is missing is an `Ok` with its
    /// status.
    pub fn execute_command(
        &self,
        command: &str,
        state: &mut ShellState,
    ) -> Result<CommandOutcome, ShellError> {
        let command = command.trim_matches(&TOKEN_SEPARATORS[..]);
        if command.is_empty() {
            return Ok(CommandOutcome::noop());
        }

        let argv = tokenize(command, self.limits.max_tokens());
        let Some(program) = argv.program() else {
            return Ok(CommandOutcome::noop());
        };

        if let Some(result) = self.builtins.dispatch(program, argv.args(), state) {
            let flow = result?;
            return Ok(CommandOutcome {
                kind: CommandKind::Builtin,
                status: 0,
                elapsed: None,
                flow,
            });
        }

        let start = Instant::now();
        let termination = self.launcher.launch(&argv)?;
        let elapsed = start.elapsed();
        debug!("{} {} after {:?}", program, termination, elapsed);

        Ok(CommandOutcome {
            kind: CommandKind::External,
            status: termination.exit_code(),
            elapsed: Some(elapsed),
            flow: Flow::Continue,
        })
    }
}
