//! Indentation helpers for moving text between a buffer and a partial

/// Remove the whitespace prefix shared by every non-blank line.
///
/// Whitespace-only lines are emptied and do not take part in the margin.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        if body.trim().is_empty() {
            out.push_str(ending);
        } else {
            out.push_str(&body[margin.len()..]);
            out.push_str(ending);
        }
    }
    out
}

/// Indentation of the first non-blank line
pub fn leading_indent(text: &str) -> &str {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .unwrap_or("")
}

/// Prefix every non-empty line with `indent`.
///
/// One trailing line terminator is dropped so the block can stand in for a
/// single line of the buffer.
pub fn indent_block(text: &str, indent: &str) -> String {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);

    body.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() { String::new() } else { format!("{}{}", indent, line) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent a statement and wrap it at word boundaries to `width` columns.
///
/// Continuation lines carry the same indentation. Words are never split, so
/// a single word wider than the limit stays on its own line. Wrapping breaks
/// at any whitespace, including inside a quoted name, and collapses runs of
/// spaces; a wrapped statement spans several lines and is no longer found by
/// the single-line include matcher. Without a width the statement is kept
/// intact.
pub fn fill(statement: &str, indent: &str, width: Option<usize>) -> String {
    let single = format!("{}{}", indent, statement.trim());
    let Some(width) = width else {
        return single;
    };
    if single.chars().count() <= width {
        return single;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(indent);
    for word in statement.split_whitespace() {
        let fresh = current.len() == indent.len();
        let needed = if fresh { word.chars().count() } else { word.chars().count() + 1 };
        if !fresh && current.chars().count() + needed > width {
            lines.push(std::mem::replace(&mut current, String::from(indent)));
        }
        if current.len() > indent.len() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines.join("\n")
}

/// Line terminator ending `text`, if any
pub fn line_ending(text: &str) -> &'static str {
    if text.ends_with("\r\n") {
        "\r\n"
    } else if text.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((i, c), _)| i + c.len_utf8())
        .unwrap_or(0);
    &a[..len]
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
