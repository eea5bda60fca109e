use inksac::prelude::*;

use crate::core::parse::{STATEMENT_SEPARATOR, TOKEN_SEPARATORS};

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the command word of every statement and the separators.
    /// Whitespace is kept byte for byte so the cursor stays put.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len() * 2);
        for (index, segment) in input.split(STATEMENT_SEPARATOR).enumerate() {
            if index > 0 {
                let separator_style = Style::builder().foreground(Color::Yellow).build();
                out.push_str(
                    &STATEMENT_SEPARATOR
                        .to_string()
                        .style(separator_style)
                        .to_string(),
                );
            }

            let rest = segment.trim_start_matches(&TOKEN_SEPARATORS[..]);
            let (leading, rest) = segment.split_at(segment.len() - rest.len());
            let word_end = rest.find(&TOKEN_SEPARATORS[..]).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(word_end);

            out.push_str(leading);
            if !word.is_empty() {
                let command_style = Style::builder()
                    .foreground(Color::Cyan)
                    .bold()
                    .build();
                out.push_str(&word.style(command_style).to_string());
            }
            out.push_str(tail);
        }
        out
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }
}
