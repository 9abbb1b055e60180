use std::collections::VecDeque;

use super::{CODE_TAG, LIST_TAGS, ParseState, classify, wrap};
use super::code_blocks::CodeBlockStore;
use super::numbering::HeaderNumbering;
use crate::config::Config;
use crate::theme::ColorScheme;
use crate::utils::display_width;

/// Group logically-continued lines into single renderable blocks.
///
/// Consumes the placeholder-substituted line stream and emits one line per
/// block, already colored by role and wrapped when oversized. Hard breaks
/// (trailing double space) and headers terminate blocks; block-quote level
/// changes start new ones.
pub(crate) fn merge_blocks(
    text: &str,
    config: &Config,
    colors: &ColorScheme,
    store: &mut CodeBlockStore,
    state: &mut ParseState,
    cols: usize,
) -> Vec<String> {
    let mut lines: VecDeque<String> = text.lines().map(str::to_string).collect();

    if config.header_numbering > -1 && lines.len() as i64 > config.header_numbering {
        state.numbering = Some(HeaderNumbering::new(
            config.header_numb_level_min,
            config.header_numb_level_max,
        ));
    }

    // one empty line at each end absorbs boundary effects
    lines.push_front(String::new());
    lines.push_back(String::new());

    let mut out: Vec<String> = Vec::new();

    while let Some(mut line) = lines.pop_front() {
        if classify::is_empty(&line) {
            out.push(String::new());
            continue;
        }

        if let Some(rule) = classify::rule_char(&line) {
            out.push(format!(
                "{}{}",
                colors.rule(rule),
                config.horiz_rule.repeat(cols)
            ));
            continue;
        }

        // indented code: a run of lines each starting with four spaces;
        // the block absorbs one preceding blank line
        if line.starts_with("    ") {
            let mut body: Vec<String> = Vec::new();
            while line.starts_with("    ") {
                body.push(line[4..].to_string());
                line = lines.pop_front().unwrap_or_default();
            }
            if out.last().is_some_and(|prev| prev.is_empty()) {
                out.pop();
            }
            let key = store.insert(format!("\n{}\n", body.join("\n")));
            out.push(format!("{}{}", CODE_TAG, key));
            lines.push_front(line);
            continue;
        }

        // text block: concatenate lines that wrap together
        let bq = classify::block_quote_status(&line, state);
        let bq_level = bq.level;
        let mut bqm = bq.marker;
        line = bq.rest;

        let mut ssi: Option<usize> = None;
        let mut opts_ssi: Option<usize> = None;
        if let Some(token) = classify::options_token(&line, config) {
            let token = token.to_string();
            opts_ssi = Some(token.chars().count());
            line = line.replacen(&token, &format!("*{}*", token), 1);
        }

        let mut src_line_nr = 0usize;
        while !line.ends_with("  ") && !classify::is_header(&line) {
            let Some(mut next) = lines.pop_front() else {
                break;
            };
            src_line_nr += 1;

            let next_bq = classify::block_quote_status(&next, state);
            if next_bq.level == bq_level {
                // drop the redundant marker run off the lookahead line
                next = next_bq.rest.clone();
            } else if next_bq.level > 0 {
                // level change starts a new block, nothing consumed
                lines.push_front(next);
                break;
            }

            // the subsequent indent is fixed on the first continuation
            if ssi.is_none() {
                let l0 = line.trim_start().to_string();
                if let Some(idx) = classify::list_marker_index(&l0, &config.list_markers) {
                    ssi = Some(2);
                    let marker = config.list_markers[idx].marker.clone();
                    line = line.replacen(&marker, &LIST_TAGS[idx].to_string(), 1);
                } else if opts_ssi.is_some() {
                    ssi = opts_ssi;
                } else if l0.starts_with('*') && !config.no_smart_indent && src_line_nr == 1 {
                    ssi = light_table_indent(&l0);
                }
            }

            if classify::is_block_boundary(&next, config) {
                if next_bq.level > 0 {
                    // put the quote marker back; the line was not consumed
                    next = format!("{} {}", next_bq.marker, next);
                }
                lines.push_front(next);
                break;
            }

            line = format!("{} {}", line.trim_end(), next.trim_start());
        }

        let ssi = ssi.or(opts_ssi).unwrap_or(0);

        // the working role resets for every block
        let mut role: &str = &colors.reset;
        let ind = line.chars().take_while(|c| c.is_whitespace()).count();
        if !bqm.is_empty() {
            bqm.push(' ');
        }
        line = format!("{}{}", bqm, line);

        if classify::is_header(&line) {
            let level = line.chars().take_while(|&c| c == '#').count();
            line = line[level..].trim_start().to_string();

            if let Some(glyph) = config.header_underlining.chars().nth(level - 1) {
                lines.push_front(glyph.to_string().repeat(3));
            }

            if let Some(numbering) = state.numbering.as_mut() {
                if let Some(number) = numbering.observe(level) {
                    line = format!("{} {}", number, line);
                }
            }
            role = colors.header(level);
        }

        if display_width(&line) > cols {
            let indent = " ".repeat(display_width(&bqm) + ind + ssi);
            line = wrap::fill(&line, cols, &indent);
        }

        if classify::is_markdown_link(&line) {
            role = &colors.gray;
        }

        out.push(format!("{}{}", role, line));
    }

    out
}

/// Column offset of the second word of a `*`-led first line, net of the
/// marker characters. Supports `*word*` and `**word**` forms with or
/// without a space before the following word, so first-column-highlighted
/// two-column tables wrap into alignment.
pub(crate) fn light_table_indent(l0: &str) -> Option<usize> {
    let marker = if l0.starts_with("**") { "**" } else { "*" };
    let chars: Vec<char> = l0.chars().collect();
    if chars.len() < 2 {
        return None;
    }

    let rest: String = chars[2..].iter().collect();
    let (_, after) = rest.split_once(marker)?;
    let offs = if after.starts_with(' ') { 1 } else { 2 };
    let tail: String = after.chars().skip(offs).collect();
    let tail_len = tail.trim_start().chars().count();

    let result = chars.len() as isize - tail_len as isize - 2 * marker.len() as isize;
    usize::try_from(result).ok()
}
