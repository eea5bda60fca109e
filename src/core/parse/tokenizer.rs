use std::ops::Deref;

use log::warn;

/// Characters that separate tokens. Nothing escapes them.
pub const TOKEN_SEPARATORS: [char; 3] = [' ', '\t', '\n'];

/// Tokens of one command, program or builtin name first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    tokens: Vec<String>,
    truncated: bool,
}

impl ArgumentVector {
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// Whether tokens past the capacity were dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl Deref for ArgumentVector {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.tokens
    }
}

/// Splits `command` on spaces, tabs and newlines, keeping at most
/// `max_tokens` tokens. The rest is dropped silently, only logged.
pub fn tokenize(command: &str, max_tokens: usize) -> ArgumentVector {
    let mut words = command
        .trim_matches(&TOKEN_SEPARATORS[..])
        .split(&TOKEN_SEPARATORS[..])
        .filter(|word| !word.is_empty());

    let tokens: Vec<String> = words.by_ref().take(max_tokens).map(String::from).collect();
    let truncated = words.next().is_some();
    if truncated {
        warn!("command has more than {} arguments, extra ones dropped", max_tokens);
    }

    ArgumentVector { tokens, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_all_separators() {
        let argv = tokenize("ls\t-l \n /tmp", 63);
        assert_eq!(&argv[..], ["ls", "-l", "/tmp"]);
        assert_eq!(argv.program(), Some("ls"));
        assert_eq!(argv.args(), ["-l", "/tmp"]);
        assert!(!argv.truncated());
    }

    #[test]
    fn test_blank_input_has_no_tokens() {
        for input in ["", "   ", "\t\n ", "\n"] {
            let argv = tokenize(input, 63);
            assert!(argv.is_empty());
            assert_eq!(argv.program(), None);
            assert!(argv.args().is_empty());
        }
    }

    #[test]
    fn test_excess_tokens_are_dropped() {
        let argv = tokenize("a b c d e", 3);
        assert_eq!(&argv[..], ["a", "b", "c"]);
        assert!(argv.truncated());

        let exact = tokenize("a b c", 3);
        assert_eq!(exact.len(), 3);
        assert!(!exact.truncated());
    }

    #[test]
    fn test_quotes_are_not_special() {
        let argv = tokenize("echo \"hello world\" 'x'", 63);
        assert_eq!(&argv[..], ["echo", "\"hello", "world\"", "'x'"]);
    }

    #[test]
    fn test_other_whitespace_is_not_a_separator() {
        let argv = tokenize("a\rb", 63);
        assert_eq!(&argv[..], ["a\rb"]);
    }
}
