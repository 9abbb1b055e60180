use super::{CODE_TAG, ParseState};
use crate::config::{Config, ListMarkerSpec};

/// Stateless predicates over a single source line

pub(crate) fn is_empty(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn is_header(line: &str) -> bool {
    line.starts_with('#')
}

/// Index into the configured marker table if the line opens a list item
pub(crate) fn list_marker_index(line: &str, markers: &[ListMarkerSpec]) -> Option<usize> {
    let trimmed = line.trim_start();
    markers
        .iter()
        .take(2)
        .position(|m| trimmed.starts_with(m.marker.as_str()))
}

/// Best-effort link heuristic, not full link-syntax validation
pub(crate) fn is_markdown_link(line: &str) -> bool {
    line.starts_with('[') && line.contains("http") && line.contains(']')
}

/// The rule character if the whole line is one repeated rule character
pub(crate) fn rule_char(line: &str) -> Option<char> {
    let first = line.chars().next()?;
    if !matches!(first, '-' | '_' | '*') {
        return None;
    }
    if line.chars().count() >= 3 && line.chars().all(|c| c == first) {
        Some(first)
    } else {
        None
    }
}

pub(crate) fn is_code_placeholder(line: &str) -> bool {
    line.starts_with(CODE_TAG)
}

/// The first whitespace-delimited token when it has the configured
/// options-table shape (prefix glyph .. suffix glyph)
pub(crate) fn options_token<'a>(line: &'a str, config: &Config) -> Option<&'a str> {
    let prefix = &config.opts_table_prefix;
    let suffix = &config.opts_table_suffix;
    let token = line.split_whitespace().next()?;

    if token.starts_with(prefix.as_str())
        && token.ends_with(suffix.as_str())
        && token.chars().count() > prefix.chars().count() + suffix.chars().count()
    {
        Some(token)
    } else {
        None
    }
}

/// Block-quote classification of one line
pub(crate) struct BlockQuote {
    pub(crate) level: usize,
    pub(crate) rest: String,
    pub(crate) marker: String,
}

/// Split a leading `>` run off the line, tracking the deepest nesting seen.
/// A `>` run without a following space is treated as plain text.
pub(crate) fn block_quote_status(line: &str, state: &mut ParseState) -> BlockQuote {
    if line.starts_with('>') {
        if let Some((marker, rest)) = line.split_once(' ') {
            if marker.chars().all(|c| c == '>') {
                let level = marker.chars().count();
                state.max_bq_depth = state.max_bq_depth.max(level);
                return BlockQuote {
                    level,
                    rest: rest.to_string(),
                    marker: marker.to_string(),
                };
            }
        }
    }

    BlockQuote {
        level: 0,
        rest: line.to_string(),
        marker: String::new(),
    }
}

/// True when the line cannot continue the preceding text block
pub(crate) fn is_block_boundary(line: &str, config: &Config) -> bool {
    is_header(line)
        || list_marker_index(line, &config.list_markers).is_some()
        || options_token(line, config).is_some()
        || is_empty(line)
        || is_markdown_link(line)
        || is_code_placeholder(line)
        || rule_char(line).is_some()
}
