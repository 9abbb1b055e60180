use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdvlError {
    #[error("Configuration parse error: {0}")]
    ConfigParseError(String),

    #[error("Invalid value '{value}' for {origin} option '{key}' (default: {default})")]
    InvalidConfigValue {
        key: &'static str,
        value: String,
        default: String,
        origin: &'static str,
    },

    #[error("Color scheme error: {0}")]
    SchemeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Monitor error: {0}")]
    MonitorError(String),
}
