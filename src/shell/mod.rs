use std::io::Write;
use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

mod executor;

pub use executor::{
    format_elapsed, CommandKind, CommandOutcome, Executor, LineOutcome, Report,
};

use crate::{
    core::{commands::Flow, config::ShellConfig, state::ShellState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::LineHelper,
};

/// Consecutive read errors after which input is treated as ended.
const MAX_READ_FAILURES: usize = 3;

pub const BANNER: &str = "Simple Shell with clone and sequential execution (;)\nType 'exit' to quit\n";

/// Prints timing lines to stdout and diagnostics to stderr.
pub struct ConsoleReporter {
    show_timing: bool,
    highlighter: SyntaxHighlighter,
}

impl ConsoleReporter {
    pub fn new(show_timing: bool, highlighter: SyntaxHighlighter) -> Self {
        Self {
            show_timing,
            highlighter,
        }
    }
}

impl Report for ConsoleReporter {
    fn timing(&mut self, elapsed: Duration) {
        if self.show_timing {
            println!("{}", format_elapsed(elapsed));
        }
    }

    fn error(&mut self, err: &ShellError) {
        eprintln!("{}", self.highlighter.highlight_error(&err.to_string()));
    }
}

pub struct Shell {
    editor: Editor<LineHelper, FileHistory>,
    executor: Executor,
    state: ShellState,
    config: ShellConfig,
    reporter: ConsoleReporter,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let mut config = ShellConfig::load(flags.get_value("config").map(Path::new))?;
        let quiet = flags.is_set("quiet");
        if quiet {
            config.banner = false;
            config.show_timing = false;
        }

        let executor = Executor::new(config.stack_size, config.limits);
        let state = ShellState::new()?;

        let mut editor = Editor::<LineHelper, FileHistory>::new()?;
        editor.set_helper(Some(LineHelper::new(executor.builtins().names())));
        editor.set_auto_add_history(true);
        if let Some(path) = config.history_path.as_ref().filter(|_| config.history) {
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), e);
            }
        }

        // The shell only sees SIGINT while a child runs; the child gets it too.
        ctrlc::set_handler(move || {
            if !quiet {
                println!("\nUse 'exit' to exit the shell");
            }
        })?;

        let reporter = ConsoleReporter::new(config.show_timing, SyntaxHighlighter::new());

        Ok(Shell {
            editor,
            executor,
            state,
            config,
            reporter,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if self.config.banner {
            println!("{}", BANNER);
        }

        let mut failures = 0;
        loop {
            let read = self.editor.readline(&self.config.prompt);
            if read.is_ok() {
                failures = 0;
            }
            match read {
                Ok(line) => {
                    if line.is_empty() {
                        continue;
                    }
                    let outcome = self
                        .executor
                        .execute_line(&line, &mut self.state, &mut self.reporter);
                    if outcome.flow == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => {
                    // The unreadable line is consumed; keep going unless the
                    // input itself is broken.
                    let err: ShellError = e.into();
                    self.reporter.error(&err);
                    failures += 1;
                    if failures >= MAX_READ_FAILURES {
                        warn!("giving up after {} consecutive read errors", failures);
                        break;
                    }
                }
            }
        }

        self.save_history();
        std::io::stdout().flush()?;
        Ok(())
    }

    fn save_history(&mut self) {
        if !self.config.history {
            return;
        }
        if let Some(path) = &self.config.history_path {
            if let Err(e) = self.editor.save_history(path) {
                warn!("could not save history to {}: {}", path.display(), e);
            }
        }
    }
}
