pub mod cli;
pub mod config;
pub mod error;
pub mod monitor;
pub mod renderer;
pub mod terminal;
pub mod theme;
pub mod utils;

use anyhow::Result;
use clap::ArgMatches;
use cli::Cli;
use config::Config;
use renderer::Renderer;
use std::io::{self, Read};
use std::path::Path;

/// Main entry point for the mdvl application
pub fn run(cli: Cli, matches: &ArgMatches) -> Result<()> {
    let mut config = Config::from_cli(&cli, matches)?;

    if !terminal::supports_color() {
        config.no_colors = true;
    }

    let content = get_input_content(&cli)?;

    let renderer = Renderer::new(&config)?;

    match renderer.render(&content) {
        Ok(output) => {
            if !config.no_print {
                println!("{}", output);
            }
        }
        Err(e) => {
            // best-effort display: fall back to the unrendered text
            log::error!("Rendering failed: {}", e);
            println!("{}", content);
            println!("md error: {}", e);
        }
    }

    if cli.monitor_file {
        if let Some(filename) = &cli.filename {
            monitor::watch_file(filename, &config)?;
        }
    }

    Ok(())
}

fn get_input_content(cli: &Cli) -> Result<String> {
    let mut content = match &cli.filename {
        Some(filename) if filename == "-" => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
        Some(filename) => {
            let path = Path::new(filename);
            if !path.exists() {
                anyhow::bail!("File not found: {}", filename);
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
    };

    strip_leading_bom(&mut content);
    Ok(content)
}

fn strip_leading_bom(text: &mut String) {
    const UTF8_BOM: char = '\u{FEFF}';
    while text.starts_with(UTF8_BOM) {
        // Standard PowerShell adds a UTF-8 BOM when piping text.
        let bom_len = UTF8_BOM.len_utf8();
        text.drain(..bom_len);
    }
}
