use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use covview::cli;

/// covview — Colorized terminal views over Istanbul-style HTML coverage reports.
#[derive(Parser)]
#[command(name = "covview", version, about)]
struct Cli {
    /// Emit the render instructions as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single report page (summary or per-file, auto-detected).
    View {
        /// Path to the report HTML page.
        file: PathBuf,
    },

    /// Resolve an identifier inside a report directory and render it.
    Show {
        /// Root directory of the generated HTML report.
        dir: PathBuf,

        /// File or directory identifier from the summary table.
        /// If omitted, shows the root summary.
        identifier: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let formatter = cli::formatter(cli.json, !cli.no_color);

    let out = match cli.command {
        Commands::View { file } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read report page {}", file.display()))?;
            cli::cmd_view(&source, formatter.as_ref())?
        }
        Commands::Show { dir, identifier } => {
            cli::cmd_show(&dir, identifier.as_deref().unwrap_or(""), formatter.as_ref())?
        }
    };

    print!("{out}");
    Ok(())
}
