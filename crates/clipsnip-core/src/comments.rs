//! Removal of the `\t//` line comments that editor-generated snippet files
//! carry but strict JSON rejects.
//!
//! Only a line that starts with exactly one tab followed by `//` is dropped.
//! Comments indented any other way, or trailing code on the same line, pass
//! through untouched.

const MARKER: &str = "//";

/// Strip tab-indented line comments, keeping every other line and its line
/// break in order.
pub fn strip_comments(raw: &str) -> String {
    raw.split_inclusive('\n')
        .filter(|line| !is_comment_line(line))
        .collect()
}

fn is_comment_line(line: &str) -> bool {
    match line.strip_prefix('\t') {
        Some(rest) => rest.starts_with(MARKER),
        None => false,
    }
}
