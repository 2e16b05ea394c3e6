//! bbrowse - Terminal Browser for Aid Beneficiary Spreadsheets
//!
//! Opens a beneficiary spreadsheet and lets the user filter it by region, RW, and RT or search
//! it by NIK.

use anyhow::{Context, Result};
use beneficiary_browser::render::ui::{ColorTheme, TerminalUI};
use beneficiary_browser::{Application, BrowserConfig, ThemeName};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

fn cli() -> Command {
    let command = Command::new("bbrowse")
        .version(beneficiary_browser::VERSION)
        .about("Browse beneficiary spreadsheets by region and NIK")
        .long_about(
            "bbrowse loads an xlsx/xls/ods workbook or a CSV file and shows its rows as a table \
             that can be filtered by WILAYAH, RW, and RT, or searched by NIK. \
             Press Ctrl-O inside the browser to open another file.",
        )
        .arg(
            Arg::new("file")
                .help("Spreadsheet to open on start-up")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .help("Color theme")
                .value_parser(ThemeName::VARIANTS),
        )
        .arg(
            Arg::new("min-search-length")
                .long("min-search-length")
                .help("Digits required before a submitted NIK search runs")
                .value_parser(value_parser!(usize)),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .help("Path to a TOML settings file")
            .value_parser(value_parser!(PathBuf)),
    );

    command
}

fn load_config(matches: &ArgMatches) -> Result<BrowserConfig> {
    #[cfg(feature = "config")]
    let mut config =
        BrowserConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    #[cfg(not(feature = "config"))]
    let mut config = BrowserConfig::default();

    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = theme.parse()?;
    }
    if let Some(&length) = matches.get_one::<usize>("min-search-length") {
        config.min_search_length = length;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = load_config(&matches).context("invalid settings")?;

    let file_path = matches.get_one::<PathBuf>("file").cloned();
    if let Some(path) = &file_path {
        if !path.exists() {
            anyhow::bail!("File does not exist: {}", path.display());
        }
        if !path.is_file() {
            anyhow::bail!("Path is not a regular file: {}", path.display());
        }
    }

    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::from_name(config.theme))?);
    let mut app = Application::new(&config, ui_renderer, file_path);

    app.run().await?;

    Ok(())
}
