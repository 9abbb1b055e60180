mod assemble;
mod classify;
mod code_blocks;
mod inline;
mod merge;
mod numbering;
mod wrap;

use crate::config::Config;
use crate::theme::ColorScheme;
use anyhow::Result;
use code_blocks::CodeBlockStore;

/// Placeholder byte protecting `*` from the alternating-pair passes
pub(crate) const STAR_TAG: char = '\u{1}';
/// Placeholder byte marking an extracted code region, followed by its key
pub(crate) const CODE_TAG: char = '\u{2}';
/// Placeholder bytes protecting list markers, one per marker slot
pub(crate) const LIST_TAGS: [char; 2] = ['\u{3}', '\u{4}'];

/// Transient parse state owned by one render call
pub(crate) struct ParseState {
    pub(crate) max_bq_depth: usize,
    pub(crate) numbering: Option<numbering::HeaderNumbering>,
}

impl ParseState {
    pub(crate) fn new() -> Self {
        Self {
            max_bq_depth: 0,
            numbering: None,
        }
    }
}

/// Line-oriented markdown renderer
pub struct Renderer {
    config: Config,
    colors: ColorScheme,
}

impl Renderer {
    pub fn new(config: &Config) -> Result<Self> {
        let colors = config.resolve_colors()?;
        Ok(Self {
            config: config.clone(),
            colors,
        })
    }

    /// Render markdown into an ANSI-colored, column-wrapped string.
    ///
    /// The pipeline: fenced-code extraction, block merging (classification,
    /// header numbering, wrapping), inline-markup resolution with code
    /// reinsertion, final assembly with global indents.
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut config = self.config.clone();

        // Single-line mode is decided from the unmodified input
        if !markdown.contains('\n') {
            config.single_line_mode = true;
            if !config.indent_explicit {
                config.indent = 0;
            }
        }

        let term_width = config.get_terminal_width();
        if config.width > 0 {
            config.rindent =
                (term_width + config.rindent).saturating_sub(config.indent + config.width);
        }
        let cols = term_width
            .saturating_sub(config.indent + config.rindent)
            .max(1);

        let source = sanitize(markdown);
        let source = source.trim();

        let mut store = CodeBlockStore::new();
        let prepared = code_blocks::extract_fenced(source, &mut store);

        let mut state = ParseState::new();
        let merged = merge::merge_blocks(
            &prepared,
            &config,
            &self.colors,
            &mut store,
            &mut state,
            cols,
        );

        let resolved = inline::resolve_markup(
            &merged.join("\n"),
            &config,
            &self.colors,
            &store,
            state.max_bq_depth,
        );

        Ok(assemble::finish(&resolved, &config, &self.colors))
    }
}

/// Drop reserved placeholder bytes so document text can never collide with
/// internally generated tags
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{1}'..='\u{4}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{display_width, strip_ansi};

    fn test_config() -> Config {
        Config {
            term_width: 80,
            term_width_explicit: true,
            ..Config::default()
        }
    }

    fn render(markdown: &str) -> (String, ColorScheme) {
        let config = test_config();
        let colors = config.resolve_colors().expect("resolve colors");
        let renderer = Renderer::new(&config).expect("build renderer");
        (renderer.render(markdown).expect("render"), colors)
    }

    #[test]
    fn headers_and_inline_markup_resolve_to_roles() {
        let (out, colors) = render("# H1\n## H2\nfoo *it* **em** bar");

        let non_empty: Vec<&str> = out
            .lines()
            .filter(|l| !strip_ansi(l).trim().is_empty())
            .collect();
        assert_eq!(non_empty.len(), 3, "{:?}", out);

        assert!(non_empty[0].contains(&colors.h1));
        assert!(strip_ansi(non_empty[0]).contains("H1"));
        assert!(non_empty[1].contains(&colors.h2));
        assert!(non_empty[2].contains(&format!("{}it{}", colors.italic, colors.reset)));
        assert!(non_empty[2].contains(&format!("{}em{}", colors.emphasis, colors.reset)));

        for line in out.lines() {
            assert!(display_width(&strip_ansi(line)) <= 80, "{:?}", line);
        }
    }

    #[test]
    fn single_line_input_skips_outer_blanks_and_indent() {
        let (out, colors) = render("> single line note");

        assert!(!out.starts_with('\n'));
        assert!(!out.starts_with(' '));
        assert!(!out.trim_end_matches(&colors.reset).ends_with('\n'));
        assert!(out.starts_with(&format!("{}┃", colors.h1)));
        assert!(strip_ansi(&out).contains("single line note"));
    }

    #[test]
    fn single_line_mode_respects_explicit_indent() {
        let config = Config {
            indent: 3,
            indent_explicit: true,
            ..test_config()
        };
        let renderer = Renderer::new(&config).expect("build renderer");
        let out = renderer.render("just one line").expect("render");
        assert!(out.starts_with("   "));
    }

    #[test]
    fn fenced_code_content_survives_byte_for_byte() {
        let (out, _) = render("para\n\n```rust\nlet x = 1;\n  indented   kept\n```\n\nafter");

        let plain = strip_ansi(&out);
        assert!(plain.contains("│ let x = 1;"));
        assert!(plain.contains("│   indented   kept"));
        assert!(plain.contains("after"));
        assert!(!plain.contains("```"));
    }

    #[test]
    fn plain_paragraph_roundtrips_modulo_whitespace() {
        let source = "one two three four five six seven eight nine ten\neleven twelve";
        let config = Config {
            term_width: 24,
            term_width_explicit: true,
            ..Config::default()
        };
        let renderer = Renderer::new(&config).expect("build renderer");
        let out = renderer.render(source).expect("render");

        let words: Vec<String> = strip_ansi(&out)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let expected: Vec<String> = source.split_whitespace().map(str::to_string).collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn block_quote_depth_produces_layered_markers() {
        for depth in 1..=3usize {
            let source = format!("{} quoted text\nand more", ">".repeat(depth));
            let (out, colors) = render(&source);

            let mut expected = String::new();
            for level in 1..=depth {
                expected.push_str(colors.header(level));
                expected.push('┃');
            }
            expected.push_str(&colors.reset);
            assert!(out.contains(&expected), "depth {}: {:?}", depth, out);
            assert_eq!(out.matches('┃').count(), depth);
        }
    }

    #[test]
    fn header_numbering_activates_past_threshold() {
        let config = Config {
            header_numbering: 0,
            ..test_config()
        };
        let renderer = Renderer::new(&config).expect("build renderer");
        let out = renderer.render("# A\n## B\n## C\n# D").expect("render");
        let plain = strip_ansi(&out);

        assert!(plain.contains("1 A"));
        assert!(plain.contains("1.1 B"));
        assert!(plain.contains("1.2 C"));
        assert!(plain.contains("2 D"));
    }

    #[test]
    fn header_numbering_stays_off_below_threshold() {
        let (out, _) = render("# A\n## B");
        let plain = strip_ansi(&out);
        assert!(plain.contains("A"));
        assert!(!plain.contains("1 A"));
    }

    #[test]
    fn reserved_bytes_are_stripped_from_input() {
        let (out, _) = render("evil \u{2}7 bytes\nmore");
        let plain = strip_ansi(&out);
        assert!(plain.contains("evil 7 bytes"));
        assert!(!plain.contains('\u{2}'));
    }

    #[test]
    fn width_option_derives_right_indent() {
        let config = Config {
            width: 30,
            ..test_config()
        };
        let renderer = Renderer::new(&config).expect("build renderer");
        let out = renderer
            .render("word ".repeat(20).trim_end())
            .expect("render");

        for line in strip_ansi(&out).lines() {
            assert!(display_width(line.trim_end()) <= 31, "{:?}", line);
        }
    }
}
