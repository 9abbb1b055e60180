use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::code_blocks::{self, CodeBlockStore};
use super::{LIST_TAGS, STAR_TAG};
use crate::config::Config;
use crate::theme::ColorScheme;

// Alternating-pair patterns: non-delimiter run, delimiter, non-delimiter
// run, optional closing delimiter. The optional closer tolerates an
// unmatched opener by closing it at end of text.
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^`]+)`([^`]+)`?").unwrap());
static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new("([^\u{1}]+)\u{1}\u{1}([^\u{1}]+)(?:\u{1}\u{1})?").unwrap());
static ITALIC_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new("([^\u{1}]+)\u{1}([^\u{1}]+)\u{1}?").unwrap());
static CODE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new("\u{2}([0-9]+)").unwrap());

/// One alternating-pair substitution pass. The leading space sentinel makes
/// a delimiter at the very start of the text a reliable opener; it is
/// stripped again before returning.
fn alternate(text: &str, pattern: &Regex, color: &str, reset: &str) -> String {
    let padded = format!(" {}", text);
    let replaced = pattern.replace_all(&padded, |caps: &Captures| {
        format!("{}{}{}{}", &caps[1], color, &caps[2], reset)
    });
    replaced[1..].to_string()
}

/// Resolve inline markup over the fully merged document text: delimiter
/// pairs become color-on/color-off spans, block-quote marker runs become
/// layered glyphs, stored code regions are reinserted, list tags become
/// their glyphs.
pub(crate) fn resolve_markup(
    text: &str,
    config: &Config,
    colors: &ColorScheme,
    store: &CodeBlockStore,
    max_bq_depth: usize,
) -> String {
    // A single star cannot be told from half of a double star by the
    // alternation alone, so every star moves behind a placeholder first.
    let mut out = text.replace('*', &STAR_TAG.to_string());

    out = alternate(&out, &CODE_SPAN, &colors.literal, &colors.reset);
    out = alternate(&out, &BOLD_SPAN, &colors.emphasis, &colors.reset);
    out = alternate(&out, &ITALIC_SPAN, &colors.italic, &colors.reset);

    // a delimiter with nothing after it never opened a span
    out = out.replace(STAR_TAG, "*");

    // resets move in front of the line break so colors stop at block edges
    if !colors.reset.is_empty() {
        out = out.replace(
            &format!("\n{}", colors.reset),
            &format!("{}\n", colors.reset),
        );
    }

    // block-quote glyphs, deepest nesting first so shorter runs never match
    // inside longer ones
    for depth in (1..=max_bq_depth).rev() {
        let mut marker = String::new();
        for level in 1..=depth {
            marker.push_str(colors.header(level));
            marker.push_str(&config.bq_mark);
        }
        marker.push_str(&colors.reset);
        out = out.replace(
            &format!("\n{}", ">".repeat(depth)),
            &format!("\n{}", marker),
        );
    }

    // reinsert stored code regions at their placeholders
    out = CODE_KEY
        .replace_all(&out, |caps: &Captures| {
            match caps[1].parse::<usize>().ok().and_then(|key| store.get(key)) {
                Some(raw) => code_blocks::format_block(raw, colors, &config.code_mark),
                None => caps[0].to_string(),
            }
        })
        .to_string();

    // list tags become their configured glyph in their configured role
    for (idx, spec) in config.list_markers.iter().take(2).enumerate() {
        out = out.replace(
            LIST_TAGS[idx],
            &format!("{}{}{}", colors.role(spec.role), spec.glyph, colors.reset),
        );
    }

    out
}
