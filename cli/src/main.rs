//! citestyle CLI - render citations and bibliographies with CSL styles

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use citestyle::{open_with_config, Item, JsonFormat, Renderer, ResolveConfig, Style};

#[derive(Parser)]
#[command(name = "citestyle")]
#[command(version)]
#[command(about = "Render citations and bibliographies with CSL styles", long_about = None)]
struct Cli {
    /// Directory holding <name>.csl files for bare style names
    #[arg(long, global = true, env = "CITESTYLE_STYLES_DIR", value_name = "DIR")]
    styles_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a citation for each item
    Cite {
        /// Style: raw markup, a file path, or a bare style name
        #[arg(short, long, value_name = "STYLE")]
        style: String,

        /// JSON file with an array of citation items
        #[arg(value_name = "ITEMS")]
        items: PathBuf,
    },

    /// Render a bibliography entry for each item
    Bib {
        /// Style: raw markup, a file path, or a bare style name
        #[arg(short, long, value_name = "STYLE")]
        style: String,

        /// JSON file with an array of citation items
        #[arg(value_name = "ITEMS")]
        items: PathBuf,
    },

    /// Show style metadata and structure as JSON
    Info {
        /// Style: raw markup, a file path, or a bare style name
        #[arg(short, long, value_name = "STYLE")]
        style: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = {
        let mut config = ResolveConfig::new();
        if let Some(dir) = cli.styles_dir {
            config = config.with_styles_dir(dir);
        }
        config
    };

    match cli.command {
        Commands::Cite { style, items } => {
            let style = open_style(&style, &config)?;
            let renderer = Renderer::new(&style);
            for item in load_items(&items)? {
                println!("{}", renderer.citation(&item)?);
            }
        }
        Commands::Bib { style, items } => {
            let style = open_style(&style, &config)?;
            let renderer = Renderer::new(&style);
            for item in load_items(&items)? {
                println!("{}", renderer.bibliography(&item)?);
            }
        }
        Commands::Info { style, compact } => {
            let style = open_style(&style, &config)?;
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            println!("{}", citestyle::to_json(&style, format)?);
        }
    }

    Ok(())
}

fn open_style(source: &str, config: &ResolveConfig) -> Result<Style, citestyle::Error> {
    log::debug!("Opening style '{}'", summary(source));
    open_with_config(source, config)
}

fn load_items(path: &PathBuf) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&data)?;
    Ok(items)
}

/// First line of a source string, for log output.
fn summary(source: &str) -> &str {
    source.lines().next().unwrap_or(source)
}
