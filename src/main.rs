use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notemark::Config;

#[derive(Parser)]
#[command(name = "notemark")]
#[command(about = "Render markdown notes to safe HTML")]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = "notemark.toml")]
    config: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a note to HTML
    Render {
        /// Input note file, or - for stdin
        input: PathBuf,

        /// Output HTML file (defaults to input name with .html extension)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print HTML instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Wrap the fragment in a full HTML document
        #[arg(long)]
        standalone: bool,
    },
    /// Print a one-line plain-text excerpt
    Excerpt {
        /// Input note file, or - for stdin
        input: PathBuf,
    },
    /// Print the parsed block structure
    Blocks {
        /// Input note file, or - for stdin
        input: PathBuf,
    },
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Error reading stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Render {
            input,
            output,
            stdout,
            standalone,
        } => {
            let note = read_input(&input)?;
            let note = config.limits.enforce(&note)?;

            let html = if standalone || config.page.standalone {
                notemark::markdown_to_page(note, &config.page)
            } else {
                notemark::markdown_to_html(note)
            };

            if stdout || (is_stdin(&input) && output.is_none()) {
                print!("{html}");
                return Ok(());
            }

            let output = output.unwrap_or_else(|| input.with_extension("html"));
            fs::write(&output, html)
                .with_context(|| format!("Error writing {}", output.display()))?;
            println!("Created {}", output.display());
        }
        Command::Excerpt { input } => {
            let note = read_input(&input)?;
            println!("{}", notemark::excerpt(&note, config.excerpt.max_chars));
        }
        Command::Blocks { input } => {
            let note = read_input(&input)?;
            for (i, block) in notemark::parse(&note).iter().enumerate() {
                println!("{i:>3} {:<12} {block:?}", block.kind());
            }
        }
    }

    Ok(())
}
