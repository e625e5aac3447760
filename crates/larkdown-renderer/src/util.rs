//! Shared Markdown text helpers.

/// Deepest heading Markdown supports.
const MAX_HEADING_DEPTH: u8 = 6;

/// Heading marker for a level; levels above 6 are clamped.
///
/// # Examples
///
/// ```
/// use larkdown_renderer::heading_marker;
///
/// assert_eq!(heading_marker(2), "##");
/// assert_eq!(heading_marker(9), "######");
/// ```
#[must_use]
pub fn heading_marker(level: u8) -> String {
    "#".repeat(usize::from(level.clamp(1, MAX_HEADING_DEPTH)))
}

/// Join rendered blocks with blank lines, skipping empty ones.
pub(crate) fn join_blocks<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prefix every line with `> ` (`>` alone for empty lines).
pub(crate) fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote each rendered child and follow it with a lone `>` line, keeping
/// all children inside one block quote. An empty child stays as a blank
/// quoted line.
pub(crate) fn quote_children(children: &[String]) -> String {
    children
        .iter()
        .map(|child| {
            if child.is_empty() {
                ">\n>".to_owned()
            } else {
                format!("{}\n>", quote_lines(child))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent every non-empty line by `width` spaces.
pub(crate) fn indent_lines(text: &str, width: usize) -> String {
    let padding = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{padding}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Backtick fence one longer than the longest backtick run in `content`
/// (at least three).
pub(crate) fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

/// Make cell text safe for a single pipe-table row.
pub(crate) fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|").lines().collect::<Vec<_>>().join("<br/>")
}
