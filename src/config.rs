use crate::cli::Cli;
use crate::error::MdvlError;
use crate::theme::{ColorScheme, Scheme, StyleRole, get_scheme};
use anyhow::Result;
use clap::{ArgMatches, parser::ValueSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_ENV: &str = "MDVL_CONFIG_PATH";

fn arg_has_user_value(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .map(|source| matches!(source, ValueSource::CommandLine | ValueSource::EnvVariable))
        .unwrap_or(false)
}

/// One recognized list marker with its rendered glyph and color role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMarkerSpec {
    pub marker: String,
    pub glyph: String,
    pub role: StyleRole,
}

fn default_list_markers() -> Vec<ListMarkerSpec> {
    vec![
        ListMarkerSpec {
            marker: "- ".to_string(),
            glyph: "❖ ".to_string(),
            role: StyleRole::Literal,
        },
        ListMarkerSpec {
            marker: "* ".to_string(),
            glyph: "▪ ".to_string(),
            role: StyleRole::H2,
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Layout
    pub term_width: usize,
    #[serde(skip)]
    pub term_width_explicit: bool,
    pub width: usize,
    pub indent: usize,
    #[serde(skip)]
    pub indent_explicit: bool,
    pub rindent: usize,

    // Rendering toggles and glyphs
    pub no_print: bool,
    pub no_colors: bool,
    pub no_smart_indent: bool,
    pub bq_mark: String,
    pub code_mark: String,
    pub horiz_rule: String,

    // Header numbering and underlining
    pub header_numbering: i64,
    pub header_numb_level_min: usize,
    pub header_numb_level_max: usize,
    pub header_underlining: String,

    // Options-table delimiters
    pub opts_table_prefix: String,
    pub opts_table_suffix: String,

    // Colors
    pub scheme: String,
    pub custom_colors: Option<String>,

    // List markers (config file only; at most two entries are honored)
    pub list_markers: Vec<ListMarkerSpec>,

    // Derived per render call, never loaded
    #[serde(skip)]
    pub single_line_mode: bool,

    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            term_width: 80,
            term_width_explicit: false,
            width: 0,
            indent: 1,
            indent_explicit: false,
            rindent: 0,
            no_print: false,
            no_colors: false,
            no_smart_indent: false,
            bq_mark: "┃".to_string(),
            code_mark: "│".to_string(),
            horiz_rule: "─".to_string(),
            header_numbering: 50,
            header_numb_level_min: 1,
            header_numb_level_max: 6,
            header_underlining: String::new(),
            opts_table_prefix: "-".to_string(),
            opts_table_suffix: ":".to_string(),
            scheme: "green".to_string(),
            custom_colors: None,
            list_markers: default_list_markers(),
            single_line_mode: false,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli, matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::load_config_files(cli, matches)?;

        config.apply_env_overrides()?;

        if cli.no_colors {
            config.no_colors = true;
        }

        if let Some(cols) = cli.cols {
            if arg_has_user_value(matches, "cols") {
                config.term_width = cols;
                config.term_width_explicit = true;
            }
        }

        if let Some(width) = cli.width {
            if arg_has_user_value(matches, "width") {
                config.width = width;
            }
        }

        if let Some(indent) = cli.indent {
            if arg_has_user_value(matches, "indent") {
                config.indent = indent;
                config.indent_explicit = true;
            }
        }

        if let Some(rindent) = cli.rindent {
            if arg_has_user_value(matches, "rindent") {
                config.rindent = rindent;
            }
        }

        if let Some(scheme) = &cli.scheme {
            if arg_has_user_value(matches, "scheme") {
                config.scheme = scheme.clone();
            }
        }

        if let Some(custom_colors) = &cli.custom_colors {
            if arg_has_user_value(matches, "custom_colors") {
                config.custom_colors = Some(custom_colors.clone());
            }
        }

        if cli.no_smart_indent {
            config.no_smart_indent = true;
        }

        if let Some(threshold) = cli.header_numbering {
            if arg_has_user_value(matches, "header_numbering") {
                config.header_numbering = threshold;
            }
        }

        if let Some(min) = cli.numbering_min {
            if arg_has_user_value(matches, "numbering_min") {
                config.header_numb_level_min = min;
            }
        }

        if let Some(max) = cli.numbering_max {
            if arg_has_user_value(matches, "numbering_max") {
                config.header_numb_level_max = max;
            }
        }

        if let Some(underlining) = &cli.header_underlining {
            if arg_has_user_value(matches, "header_underlining") {
                config.header_underlining = underlining.clone();
            }
        }

        if let Some(mark) = &cli.quote_mark {
            if arg_has_user_value(matches, "quote_mark") {
                config.bq_mark = mark.clone();
            }
        }

        if let Some(mark) = &cli.code_mark {
            if arg_has_user_value(matches, "code_mark") {
                config.code_mark = mark.clone();
            }
        }

        if let Some(glyph) = &cli.rule_glyph {
            if arg_has_user_value(matches, "rule_glyph") {
                config.horiz_rule = glyph.clone();
            }
        }

        if let Some(prefix) = &cli.opts_prefix {
            if arg_has_user_value(matches, "opts_prefix") {
                config.opts_table_prefix = prefix.clone();
            }
        }

        if let Some(suffix) = &cli.opts_suffix {
            if arg_has_user_value(matches, "opts_suffix") {
                config.opts_table_suffix = suffix.clone();
            }
        }

        Ok(config)
    }

    fn load_config_files(cli: &Cli, matches: &ArgMatches) -> Result<Self> {
        if cli.no_config {
            return Ok(Self::default());
        }

        let mut config = Self::default();

        for path in Self::get_config_paths(cli, matches) {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(file_config) => {
                        config.merge_with(file_config);
                        config.config_file = Some(path.clone());
                        break;
                    }
                    Err(e) => {
                        log::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(config)
    }

    fn get_config_paths(cli: &Cli, matches: &ArgMatches) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_file) = &cli.config_file {
            if arg_has_user_value(matches, "config_file") {
                paths.push(config_file.clone());
            }
        }

        if let Some(env_path) = std::env::var_os(CONFIG_FILE_ENV) {
            if !env_path.is_empty() {
                paths.push(PathBuf::from(env_path));
            }
        }

        if cfg!(target_os = "windows") {
            if let Some(home_dir) = dirs::home_dir() {
                let mdvl_dir = home_dir.join(".config").join("mdvl");
                paths.push(mdvl_dir.join("config.yaml"));
                paths.push(mdvl_dir.join("config.yml"));
            }
        } else if let Some(config_dir) = dirs::config_dir() {
            let mdvl_dir = config_dir.join("mdvl");
            paths.push(mdvl_dir.join("config.yaml"));
            paths.push(mdvl_dir.join("config.yml"));
        }

        paths
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str::<Self>(&content).map_err(|_| {
            anyhow::Error::from(MdvlError::ConfigParseError(format!(
                "Failed to parse YAML config file: {}",
                path.display()
            )))
        })
    }

    fn merge_with(&mut self, other: Self) {
        let defaults = Self::default();

        if other.term_width != defaults.term_width {
            self.term_width = other.term_width;
        }
        if other.width != defaults.width {
            self.width = other.width;
        }
        if other.indent != defaults.indent {
            self.indent = other.indent;
        }
        if other.rindent != defaults.rindent {
            self.rindent = other.rindent;
        }
        if other.no_print {
            self.no_print = true;
        }
        if other.no_colors {
            self.no_colors = true;
        }
        if other.no_smart_indent {
            self.no_smart_indent = true;
        }
        if other.bq_mark != defaults.bq_mark {
            self.bq_mark = other.bq_mark;
        }
        if other.code_mark != defaults.code_mark {
            self.code_mark = other.code_mark;
        }
        if other.horiz_rule != defaults.horiz_rule {
            self.horiz_rule = other.horiz_rule;
        }
        if other.header_numbering != defaults.header_numbering {
            self.header_numbering = other.header_numbering;
        }
        if other.header_numb_level_min != defaults.header_numb_level_min {
            self.header_numb_level_min = other.header_numb_level_min;
        }
        if other.header_numb_level_max != defaults.header_numb_level_max {
            self.header_numb_level_max = other.header_numb_level_max;
        }
        if other.header_underlining != defaults.header_underlining {
            self.header_underlining = other.header_underlining;
        }
        if other.opts_table_prefix != defaults.opts_table_prefix {
            self.opts_table_prefix = other.opts_table_prefix;
        }
        if other.opts_table_suffix != defaults.opts_table_suffix {
            self.opts_table_suffix = other.opts_table_suffix;
        }
        if other.scheme != defaults.scheme {
            self.scheme = other.scheme;
        }
        if other.custom_colors.is_some() {
            self.custom_colors = other.custom_colors;
        }
        if !markers_equal(&other.list_markers, &defaults.list_markers) {
            self.list_markers = other.list_markers;
        }
    }

    /// Apply `MDVL_*` environment overrides for every configuration field
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_usize("MDVL_TERM_WIDTH", self.term_width)? {
            self.term_width = value;
            self.term_width_explicit = true;
        }
        if let Some(value) = env_usize("MDVL_WIDTH", self.width)? {
            self.width = value;
        }
        if let Some(value) = env_usize("MDVL_INDENT", self.indent)? {
            self.indent = value;
            self.indent_explicit = true;
        }
        if let Some(value) = env_usize("MDVL_RINDENT", self.rindent)? {
            self.rindent = value;
        }
        if let Some(value) = env_bool("MDVL_NO_PRINT", self.no_print)? {
            self.no_print = value;
        }
        if let Some(value) = env_bool("MDVL_NO_COLOR", self.no_colors)? {
            self.no_colors = value;
        }
        if let Some(value) = env_bool("MDVL_NO_SMART_INDENT", self.no_smart_indent)? {
            self.no_smart_indent = value;
        }
        if let Some(value) = env_string("MDVL_BQ_MARK") {
            self.bq_mark = value;
        }
        if let Some(value) = env_string("MDVL_CODE_MARK") {
            self.code_mark = value;
        }
        if let Some(value) = env_string("MDVL_HORIZ_RULE") {
            self.horiz_rule = value;
        }
        if let Some(value) = env_i64("MDVL_HEADER_NUMBERING", self.header_numbering)? {
            self.header_numbering = value;
        }
        if let Some(value) = env_usize("MDVL_NUMBERING_MIN", self.header_numb_level_min)? {
            self.header_numb_level_min = value;
        }
        if let Some(value) = env_usize("MDVL_NUMBERING_MAX", self.header_numb_level_max)? {
            self.header_numb_level_max = value;
        }
        if let Some(value) = env_string("MDVL_HEADER_UNDERLINING") {
            self.header_underlining = value;
        }
        if let Some(value) = env_string("MDVL_OPTS_PREFIX") {
            self.opts_table_prefix = value;
        }
        if let Some(value) = env_string("MDVL_OPTS_SUFFIX") {
            self.opts_table_suffix = value;
        }
        if let Some(value) = env_string("MDVL_SCHEME") {
            self.scheme = value;
        }

        Ok(())
    }

    /// Resolve the configured scheme, environment colors and custom
    /// override pairs into concrete escape strings
    pub fn resolve_colors(&self) -> Result<ColorScheme> {
        let mut scheme: Scheme = get_scheme(&self.scheme)?;
        scheme.apply_env_overrides();
        if let Some(custom) = &self.custom_colors {
            scheme.apply_custom_overrides(custom)?;
        }
        ColorScheme::resolve(&scheme, self.no_colors)
    }

    pub fn get_terminal_width(&self) -> usize {
        if self.term_width_explicit {
            return self.term_width;
        }

        if let Some(width) = crate::terminal::detected_width() {
            return width;
        }

        self.term_width
    }
}

fn markers_equal(a: &[ListMarkerSpec], b: &[ListMarkerSpec]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.marker == y.marker && x.glyph == y.glyph && x.role == y.role)
}

fn env_string(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn env_usize(key: &'static str, default: usize) -> Result<Option<usize>> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
            MdvlError::InvalidConfigValue {
                key,
                value: raw,
                default: default.to_string(),
                origin: "environment",
            }
            .into()
        }),
    }
}

fn env_i64(key: &'static str, default: i64) -> Result<Option<i64>> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            MdvlError::InvalidConfigValue {
                key,
                value: raw,
                default: default.to_string(),
                origin: "environment",
            }
            .into()
        }),
    }
}

fn env_bool(key: &'static str, default: bool) -> Result<Option<bool>> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(MdvlError::InvalidConfigValue {
                key,
                value: raw,
                default: default.to_string(),
                origin: "environment",
            }
            .into()),
        },
    }
}
