use crate::error::MdvlError;
use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    terminal::{Clear, ClearType, size},
};
use std::io;

/// Detected terminal width, or None when not attached to a terminal
pub fn detected_width() -> Option<usize> {
    match size() {
        Ok((width, _)) if width >= 20 => Some(width as usize),
        _ => None,
    }
}

/// Check if terminal supports color output
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
        if term.contains("color") || term.contains("256") || term == "xterm" {
            return true;
        }
    }

    if std::env::var("COLORTERM").is_ok() {
        return true;
    }

    // Default to true for most modern terminals
    true
}

pub fn clear_screen() -> Result<()> {
    io::stdout()
        .execute(Clear(ClearType::All))
        .map_err(|e| MdvlError::TerminalError(e.to_string()))?;
    Ok(())
}
