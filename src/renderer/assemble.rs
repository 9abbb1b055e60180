use crate::config::Config;
use crate::theme::ColorScheme;

/// Final assembly: strip ragged boundaries, wrap the document in blank
/// lines unless single-line mode is active, apply the global left and
/// right indents, and close with one reset
pub(crate) fn finish(text: &str, config: &Config, colors: &ColorScheme) -> String {
    let mut out = strip_boundary(text, &colors.reset).to_string();

    if !config.single_line_mode {
        out = format!("\n{}\n", out);
    }

    let left = " ".repeat(config.indent);
    let right = " ".repeat(config.rindent);
    if !left.is_empty() || !right.is_empty() {
        out = format!(
            "{}{}",
            left,
            out.replace('\n', &format!("{}\n{}", right, left))
        );
    }

    out.push_str(&colors.reset);
    out
}

/// Strip spaces, reset sequences and line breaks from both ends, repeating
/// until nothing more can be removed
fn strip_boundary<'a>(text: &'a str, reset: &str) -> &'a str {
    let mut s = text;
    loop {
        let len = s.len();

        for token in [" ", "\n"] {
            s = s.strip_prefix(token).unwrap_or(s);
            s = s.strip_suffix(token).unwrap_or(s);
        }
        if !reset.is_empty() {
            s = s.strip_prefix(reset).unwrap_or(s);
            s = s.strip_suffix(reset).unwrap_or(s);
        }

        if s.len() == len {
            break;
        }
    }
    s
}
