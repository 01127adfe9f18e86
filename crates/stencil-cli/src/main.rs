//! Stencil CLI - Generate HTML templates from the terminal
//!
//! Talks to a running Stencil server and streams the template as it is
//! generated.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use api::StencilClient;
use config::Config;

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Stencil CLI - Generate HTML templates", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an HTML template from a description
    Generate {
        /// What the template is for (e.g., "order confirmation email")
        prompt: String,
        /// Replace the server's default system prompt
        #[arg(short, long)]
        system: Option<String>,
        /// Server URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,
        /// Write the template to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the server is up
    Health {
        /// Server URL (overrides config)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set the default server URL
    SetUrl {
        /// e.g. http://localhost:3005
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Generate {
            prompt,
            system,
            url,
            output,
        } => {
            if prompt.is_empty() {
                bail!("Prompt cannot be empty");
            }
            let client = StencilClient::new(&config.resolve_url(url.as_deref()));

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
                ),
                None => Box::new(io::stdout().lock()),
            };

            let outcome = client
                .generate(&prompt, system.as_deref(), out.as_mut())
                .await?;
            drop(out);

            if outcome.finished {
                eprintln!();
                eprintln!("{} {} bytes", "✓ Finished".green(), outcome.bytes);
                if let Some(path) = output {
                    eprintln!("  Saved to {}", path.display().to_string().cyan());
                }
            } else {
                eprintln!();
                if let Some(reason) = &outcome.interrupted {
                    eprintln!("{} {}", "✗ Stream interrupted:".yellow(), reason);
                }
                eprintln!(
                    "{} stream ended after {} bytes without a completion marker",
                    "✗".yellow(),
                    outcome.bytes
                );
                std::process::exit(1);
            }
        }

        Commands::Health { url } => {
            let base_url = config.resolve_url(url.as_deref());
            let health = StencilClient::new(&base_url).health().await?;
            println!(
                "{} {} ({} v{})",
                "✓".green(),
                base_url,
                health.status,
                health.version
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::SetUrl { url }) => {
                config.set_base_url(&url);
                config.save()?;
                println!("{} Default URL set to {}", "✓".green(), config.base_url.cyan());
            }
            None => {
                println!("{}", "Stencil CLI Configuration".bold());
                println!("  Config file: {}", Config::config_path()?.display());
                println!("  Base URL:    {}", config.base_url.cyan());
            }
        },
    }

    Ok(())
}
