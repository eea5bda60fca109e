use std::borrow::Cow;
use std::collections::BTreeSet;
use std::env;
use std::fs;

use crate::core::parse::{STATEMENT_SEPARATOR, TOKEN_SEPARATORS};
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, FilenameCompleter, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: command-name completion for the statement under the
/// cursor, file names for its arguments, and highlighting.
pub struct LineHelper {
    commands: BTreeSet<String>,
    files: FilenameCompleter,
    highlighter: SyntaxHighlighter,
}

impl LineHelper {
    pub fn new<'a>(builtins: impl IntoIterator<Item = &'a str>) -> Self {
        let mut helper = LineHelper {
            commands: BTreeSet::new(),
            files: FilenameCompleter::new(),
            highlighter: SyntaxHighlighter::new(),
        };
        helper.commands.extend(builtins.into_iter().map(String::from));
        helper.refresh_commands();
        helper
    }

    /// Adds every file found in the `PATH` directories.
    pub fn refresh_commands(&mut self) {
        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_file = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }
}

/// Where the current statement's command word starts, and whether the
/// cursor is still inside it.
fn command_word(line: &str, pos: usize) -> (usize, bool) {
    let before = &line[..pos];
    let statement_start = before
        .rfind(STATEMENT_SEPARATOR)
        .map_or(0, |i| i + STATEMENT_SEPARATOR.len_utf8());
    let statement = &before[statement_start..];
    let word_start = statement_start
        + (statement.len() - statement.trim_start_matches(&TOKEN_SEPARATORS[..]).len());
    let in_word = !line[word_start..pos].contains(&TOKEN_SEPARATORS[..]);
    (word_start, in_word)
}

impl Helper for LineHelper {}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.highlight_prompt(prompt))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for LineHelper {
    type Hint = String;
}

impl Validator for LineHelper {}

impl Completer for LineHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, in_word) = command_word(line, pos);
        if in_word {
            return Ok((start, self.complete_command(&line[start..pos])));
        }
        self.files.complete(line, pos, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_word_positions() {
        assert_eq!(command_word("", 0), (0, true));
        assert_eq!(command_word("ec", 2), (0, true));
        assert_eq!(command_word("  ec", 4), (2, true));
        assert_eq!(command_word("ls -l", 5), (0, false));
        assert_eq!(command_word("ls; ec", 6), (4, true));
        assert_eq!(command_word("ls;\tcd /t", 9), (4, false));
    }

    #[test]
    fn test_builtins_complete() {
        let helper = LineHelper::new(["cd", "exit"]);
        let names: Vec<String> = helper
            .complete_command("ex")
            .into_iter()
            .map(|p| p.replacement)
            .collect();
        assert!(names.contains(&"exit".to_string()));
        assert!(names.iter().all(|n| n.starts_with("ex")));
    }
}
