use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mdvl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Lightweight Terminal Markdown Renderer",
    long_about = r#"
mdvl renders Markdown-flavored text as ANSI-colored, column-wrapped terminal output. It understands headers, lists, block quotes, horizontal rules, fenced and indented code blocks, inline emphasis and hard line breaks, and reflows paragraphs to the terminal width.

Examples:
  mdvl README.md                   # Render a markdown file
  mdvl -c 60 README.md             # Render at a fixed column width
  cat README.md | mdvl             # Read from stdin
  mdvl -t blue -N 0 README.md      # Blue scheme, number all headers
  mdvl -m README.md                # Re-render whenever the file changes
"#
)]
pub struct Cli {
    /// Path to markdown file (use '-' for stdin)
    #[arg(value_name = "FILE")]
    pub filename: Option<String>,

    /// Alternative config file path
    #[arg(short = 'F', long = "config-file", value_name = "CONFIG_PATH")]
    pub config_file: Option<PathBuf>,

    /// Skip loading configuration files
    #[arg(short = 'n', long = "no-config")]
    pub no_config: bool,

    /// Strip all ANSI colors
    #[arg(short = 'A', long = "no-colors")]
    pub no_colors: bool,

    /// Fix columns to this width instead of the detected terminal width
    #[arg(short = 'c', long = "cols")]
    pub cols: Option<usize>,

    /// Target content width; the right indent is derived from it
    #[arg(short = 'w', long = "width")]
    pub width: Option<usize>,

    /// Global left indent in spaces
    #[arg(short = 'i', long = "indent")]
    pub indent: Option<usize>,

    /// Global right indent in spaces
    #[arg(short = 'r', long = "rindent")]
    pub rindent: Option<usize>,

    /// Set color scheme
    #[arg(short = 't', long = "scheme", default_value = "green")]
    pub scheme: Option<String>,

    /// Override colors of the selected scheme (e.g. `h1=158;italic=[3m`)
    #[arg(short = 'y', long = "custom-colors", value_name = "PAIRS")]
    pub custom_colors: Option<String>,

    /// Disable the light-table subsequent-indent heuristic
    #[arg(short = 'S', long = "no-smart-indent")]
    pub no_smart_indent: bool,

    /// Minimum document line count before headers get numbered (-1 disables)
    #[arg(
        short = 'N',
        long = "header-numbering",
        value_name = "LINES",
        allow_hyphen_values = true
    )]
    pub header_numbering: Option<i64>,

    /// Shallowest header level shown in numbers
    #[arg(long = "numbering-min", value_name = "LEVEL")]
    pub numbering_min: Option<usize>,

    /// Deepest header level that still gets a number
    #[arg(long = "numbering-max", value_name = "LEVEL")]
    pub numbering_max: Option<usize>,

    /// Underline glyph per header level (e.g. `*-` underlines H1 and H2)
    #[arg(short = 'u', long = "header-underlining", value_name = "GLYPHS")]
    pub header_underlining: Option<String>,

    /// Block-quote marker glyph
    #[arg(short = 'q', long = "quote-mark", value_name = "GLYPH")]
    pub quote_mark: Option<String>,

    /// Code-block gutter glyph
    #[arg(short = 'k', long = "code-mark", value_name = "GLYPH")]
    pub code_mark: Option<String>,

    /// Horizontal-rule glyph
    #[arg(short = 'R', long = "rule-glyph", value_name = "GLYPH")]
    pub rule_glyph: Option<String>,

    /// Options-table token prefix
    #[arg(long = "opts-prefix", value_name = "GLYPH")]
    pub opts_prefix: Option<String>,

    /// Options-table token suffix
    #[arg(long = "opts-suffix", value_name = "GLYPH")]
    pub opts_suffix: Option<String>,

    /// Monitor file for changes and redisplay
    #[arg(short = 'm', long = "monitor")]
    pub monitor_file: bool,
}
