use crate::error::MdvlError;
use anyhow::{Result, anyhow, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The one reset sequence the renderer ever emits
pub const RESET: &str = "\x1b[0m";

/// Symbolic style roles resolved by a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleRole {
    H1,
    H2,
    H3,
    H4,
    Literal,
    Code,
    Gray,
    Emphasis,
    Italic,
}

/// A named scheme with raw, unresolved color values.
///
/// A value may be a bare 256-color index (`"158"`), a pre-formed escape
/// sequence with the ESC byte spelled as a leading `[` (`"[1;3m"`), or a
/// full escape string containing `\x1b` already.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scheme {
    pub name: String,
    pub description: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub literal: String,
    pub code: String,
    pub gray: String,
    pub emphasis: String,
    pub italic: String,
}

impl Default for Scheme {
    fn default() -> Self {
        // The classic greenish palette
        Self {
            name: "green".to_string(),
            description: "Greenish default palette".to_string(),
            h1: "158".to_string(),
            h2: "115".to_string(),
            h3: "72".to_string(),
            h4: "66".to_string(),
            literal: "66".to_string(),
            code: "245".to_string(),
            gray: "240".to_string(),
            emphasis: "158".to_string(),
            italic: "72".to_string(),
        }
    }
}

/// Built-in schemes
static BUILTIN_SCHEMES: Lazy<HashMap<String, Scheme>> = Lazy::new(|| {
    let mut schemes = HashMap::new();

    schemes.insert("green".to_string(), Scheme::default());

    schemes.insert(
        "blue".to_string(),
        Scheme {
            name: "blue".to_string(),
            description: "Cool blue palette".to_string(),
            h1: "117".to_string(),
            h2: "75".to_string(),
            h3: "68".to_string(),
            h4: "60".to_string(),
            literal: "68".to_string(),
            code: "245".to_string(),
            gray: "240".to_string(),
            emphasis: "117".to_string(),
            italic: "68".to_string(),
        },
    );

    schemes.insert(
        "mono".to_string(),
        Scheme {
            name: "mono".to_string(),
            description: "Grayscale palette".to_string(),
            h1: "255".to_string(),
            h2: "252".to_string(),
            h3: "249".to_string(),
            h4: "246".to_string(),
            literal: "250".to_string(),
            code: "245".to_string(),
            gray: "240".to_string(),
            emphasis: "255".to_string(),
            italic: "250".to_string(),
        },
    );

    schemes
});

pub fn get_scheme(name: &str) -> Result<Scheme> {
    BUILTIN_SCHEMES.get(name).cloned().ok_or_else(|| {
        MdvlError::SchemeError(format!("Unknown color scheme '{}'.", name)).into()
    })
}

pub fn scheme_names() -> Vec<String> {
    let mut names: Vec<String> = BUILTIN_SCHEMES.keys().cloned().collect();
    names.sort();
    names
}

const COLOR_ENV_KEYS: &[(&str, StyleRole)] = &[
    ("MDVL_COLOR_H1", StyleRole::H1),
    ("MDVL_COLOR_H2", StyleRole::H2),
    ("MDVL_COLOR_H3", StyleRole::H3),
    ("MDVL_COLOR_H4", StyleRole::H4),
    ("MDVL_COLOR_LITERAL", StyleRole::Literal),
    ("MDVL_COLOR_CODE", StyleRole::Code),
    ("MDVL_COLOR_GRAY", StyleRole::Gray),
    ("MDVL_COLOR_EMPHASIS", StyleRole::Emphasis),
    ("MDVL_COLOR_ITALIC", StyleRole::Italic),
];

impl Scheme {
    fn slot(&mut self, role: StyleRole) -> &mut String {
        match role {
            StyleRole::H1 => &mut self.h1,
            StyleRole::H2 => &mut self.h2,
            StyleRole::H3 => &mut self.h3,
            StyleRole::H4 => &mut self.h4,
            StyleRole::Literal => &mut self.literal,
            StyleRole::Code => &mut self.code,
            StyleRole::Gray => &mut self.gray,
            StyleRole::Emphasis => &mut self.emphasis,
            StyleRole::Italic => &mut self.italic,
        }
    }

    /// Apply `MDVL_COLOR_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        for (key, role) in COLOR_ENV_KEYS {
            if let Ok(value) = std::env::var(key) {
                if !value.trim().is_empty() {
                    *self.slot(*role) = value.trim().to_string();
                }
            }
        }
    }

    /// Apply `key=value;key=value` overrides from the command line
    pub fn apply_custom_overrides(&mut self, overrides: &str) -> Result<()> {
        for (key, value) in parse_override_pairs(overrides)? {
            let role = match normalize_key(&key).as_str() {
                "h1" => StyleRole::H1,
                "h2" => StyleRole::H2,
                "h3" => StyleRole::H3,
                "h4" => StyleRole::H4,
                "literal" | "l" => StyleRole::Literal,
                "code" => StyleRole::Code,
                "gray" | "grey" => StyleRole::Gray,
                "emphasis" | "emph" | "bold" => StyleRole::Emphasis,
                "italic" | "ital" => StyleRole::Italic,
                other => bail!("Unknown key for custom colors: '{}'.", other),
            };
            *self.slot(role) = value;
        }
        Ok(())
    }
}

fn parse_override_pairs(overrides: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for chunk in overrides.split(';') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        let Some((key, value)) = chunk.split_once('=') else {
            bail!("Override '{}' must have the form key=value.", chunk);
        };

        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            bail!("Override '{}' has an empty key.", chunk);
        }
        if value.is_empty() {
            bail!("Key '{}' has an empty value in override.", key);
        }

        pairs.push((key.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        bail!("Override string is empty.");
    }

    Ok(pairs)
}

fn normalize_key(key: &str) -> String {
    key.trim().replace(['-', ' '], "_").to_ascii_lowercase()
}

/// Style roles resolved to concrete escape strings for one render call
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub literal: String,
    pub code: String,
    pub gray: String,
    pub emphasis: String,
    pub italic: String,
    pub reset: String,
}

impl ColorScheme {
    pub fn resolve(scheme: &Scheme, no_colors: bool) -> Result<Self> {
        if no_colors {
            return Ok(Self {
                h1: String::new(),
                h2: String::new(),
                h3: String::new(),
                h4: String::new(),
                literal: String::new(),
                code: String::new(),
                gray: String::new(),
                emphasis: String::new(),
                italic: String::new(),
                reset: String::new(),
            });
        }

        Ok(Self {
            h1: resolve_color_value("h1", &scheme.h1)?,
            h2: resolve_color_value("h2", &scheme.h2)?,
            h3: resolve_color_value("h3", &scheme.h3)?,
            h4: resolve_color_value("h4", &scheme.h4)?,
            literal: resolve_color_value("literal", &scheme.literal)?,
            code: resolve_color_value("code", &scheme.code)?,
            gray: resolve_color_value("gray", &scheme.gray)?,
            emphasis: resolve_color_value("emphasis", &scheme.emphasis)?,
            italic: resolve_color_value("italic", &scheme.italic)?,
            reset: RESET.to_string(),
        })
    }

    pub fn role(&self, role: StyleRole) -> &str {
        match role {
            StyleRole::H1 => &self.h1,
            StyleRole::H2 => &self.h2,
            StyleRole::H3 => &self.h3,
            StyleRole::H4 => &self.h4,
            StyleRole::Literal => &self.literal,
            StyleRole::Code => &self.code,
            StyleRole::Gray => &self.gray,
            StyleRole::Emphasis => &self.emphasis,
            StyleRole::Italic => &self.italic,
        }
    }

    /// Header color for a level, falling back to the literal role past H4
    pub fn header(&self, level: usize) -> &str {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            _ => &self.literal,
        }
    }

    /// Color for a horizontal rule drawn from the given rule character
    pub fn rule(&self, ch: char) -> &str {
        match ch {
            '_' => &self.h3,
            '*' => &self.h1,
            _ => &self.literal,
        }
    }
}

/// Resolve one raw color value into an escape string.
///
/// Accepts a bare 256-color index, a `[`-prefixed sequence missing only the
/// ESC byte, or a string that already contains an escape character.
fn resolve_color_value(key: &str, value: &str) -> Result<String> {
    let value = value.trim();

    if value.contains('\x1b') {
        return Ok(value.to_string());
    }

    if let Some(rest) = value.strip_prefix('[') {
        return Ok(format!("\x1b[{}", rest));
    }

    match value.parse::<u16>() {
        Ok(n) if n <= 255 => Ok(format!("\x1b[1;38;5;{}m", n)),
        _ => Err(anyhow!(
            "Color value '{}' for role '{}' is neither a 256-color index nor an escape sequence.",
            value,
            key
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_becomes_bold_foreground_escape() {
        assert_eq!(
            resolve_color_value("h1", "158").unwrap(),
            "\x1b[1;38;5;158m"
        );
    }

    #[test]
    fn bracket_value_gets_escape_byte_prepended() {
        assert_eq!(resolve_color_value("italic", "[3m").unwrap(), "\x1b[3m");
    }

    #[test]
    fn preformed_escape_passes_through() {
        assert_eq!(
            resolve_color_value("code", "\x1b[38;5;245m").unwrap(),
            "\x1b[38;5;245m"
        );
    }

    #[test]
    fn garbage_value_is_rejected() {
        assert!(resolve_color_value("h1", "chartreuse").is_err());
        assert!(resolve_color_value("h1", "300").is_err());
    }

    #[test]
    fn builtin_schemes_resolve() {
        for name in scheme_names() {
            let scheme = get_scheme(&name).unwrap();
            assert!(ColorScheme::resolve(&scheme, false).is_ok(), "{}", name);
        }
    }

    #[test]
    fn unknown_scheme_is_an_error() {
        assert!(get_scheme("nonexistent").is_err());
    }

    #[test]
    fn no_colors_resolves_every_role_empty() {
        let colors = ColorScheme::resolve(&Scheme::default(), true).unwrap();
        assert!(colors.h1.is_empty());
        assert!(colors.reset.is_empty());
    }

    #[test]
    fn header_fallback_past_h4_is_literal() {
        let colors = ColorScheme::resolve(&Scheme::default(), false).unwrap();
        assert_eq!(colors.header(5), colors.literal.as_str());
        assert_eq!(colors.header(1), colors.h1.as_str());
    }

    #[test]
    fn custom_overrides_are_applied() {
        let mut scheme = Scheme::default();
        scheme
            .apply_custom_overrides("h1=200; italic=[3m; emph=117")
            .expect("custom overrides should be applied");
        assert_eq!(scheme.h1, "200");
        assert_eq!(scheme.italic, "[3m");
        assert_eq!(scheme.emphasis, "117");
    }

    #[test]
    fn custom_overrides_reject_unknown_key() {
        let mut scheme = Scheme::default();
        assert!(scheme.apply_custom_overrides("banner=200").is_err());
    }

    #[test]
    fn custom_overrides_reject_malformed_pair() {
        let mut scheme = Scheme::default();
        assert!(scheme.apply_custom_overrides("h1").is_err());
        assert!(scheme.apply_custom_overrides("h1=").is_err());
    }
}
