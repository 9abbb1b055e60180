use crate::utils::display_width;
use unicode_width::UnicodeWidthChar;

/// Greedy word wrap with a fixed indent on continuation lines.
///
/// Whitespace is normalized: words are re-joined with single spaces, and a
/// word too long for a line of its own is broken at the column limit.
/// Widths are measured as display columns, not bytes.
pub(crate) fn fill(text: &str, width: usize, subsequent_indent: &str) -> String {
    let width = width.max(1);
    let indent_width = display_width(subsequent_indent);

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;
    // prefix already occupying the current line: nothing on the first line,
    // the indent on continuations
    let mut prefix_width = 0usize;
    let mut has_content = false;

    for word in text.split_whitespace() {
        let word_width = display_width(word);

        if has_content {
            if line_width + 1 + word_width <= width {
                line.push(' ');
                line_width += 1;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(subsequent_indent);
                line_width = indent_width;
                prefix_width = indent_width;
                has_content = false;
            }
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && line_width > prefix_width {
                lines.push(std::mem::take(&mut line));
                line.push_str(subsequent_indent);
                line_width = indent_width;
                prefix_width = indent_width;
            }
            line.push(ch);
            line_width += ch_width;
        }
        has_content = true;
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
