use log::warn;

pub const STATEMENT_SEPARATOR: char = ';';

/// Splits a line into statements, in order, borrowing from `line`.
///
/// Empty segments (`a;;b`, a trailing `;`) are kept and become no-ops when
/// executed. Statements past `max_statements` are dropped and logged.
pub fn split_statements(line: &str, max_statements: usize) -> Vec<&str> {
    let mut segments = line.split(STATEMENT_SEPARATOR);
    let statements: Vec<&str> = segments.by_ref().take(max_statements).collect();
    if segments.next().is_some() {
        warn!("line has more than {} statements, extra ones dropped", max_statements);
    }
    statements
}

/// Cuts `line` to fewer than `capacity` bytes, backing off to a char
/// boundary. Mirrors a fixed input buffer that keeps room for a terminator.
pub fn truncate_line(line: &str, capacity: usize) -> &str {
    let limit = capacity.saturating_sub(1);
    if line.len() <= limit {
        return line;
    }
    let mut end = limit;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    warn!("input longer than {} bytes, truncated", limit);
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        assert_eq!(
            split_statements("false; cd /nonexistent; true", 64),
            ["false", " cd /nonexistent", " true"]
        );
    }

    #[test]
    fn test_empty_segments_are_kept() {
        assert_eq!(split_statements(";;", 64), ["", "", ""]);
        assert_eq!(split_statements("ls;", 64), ["ls", ""]);
        assert_eq!(split_statements("", 64), [""]);
    }

    #[test]
    fn test_statement_bound() {
        let statements = split_statements("a;b;c;d", 2);
        assert_eq!(statements, ["a", "b"]);
    }

    #[test]
    fn test_statements_borrow_from_line() {
        let line = String::from("echo a;echo b");
        let statements = split_statements(&line, 64);
        let range = line.as_ptr() as usize..line.as_ptr() as usize + line.len();
        for statement in statements {
            assert!(range.contains(&(statement.as_ptr() as usize)));
        }
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("abcdef", 1024), "abcdef");
        assert_eq!(truncate_line("abcdef", 4), "abc");
        // 'é' is two bytes; a cut in the middle backs off.
        assert_eq!(truncate_line("aé", 3), "a");
        assert_eq!(truncate_line("abc", 0), "");
    }
}
