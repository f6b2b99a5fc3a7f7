// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands::{email_command, fetch_command, scaffold_command};
use cmd::common::CommandContext;
use diagnostics::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "retro")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Pipeline config file (default: ./retro.yaml if present)
    #[arg(short, long, global = true, env = "RETRO_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a newsletter draft for a publication month
    Scaffold {
        /// Publication month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Overwrite an existing draft for the same month
        #[arg(short, long)]
        force: bool,
    },
    /// Render the email HTML for a finished draft
    Email {
        /// Draft slug, e.g. 2026-01-january
        slug: String,
    },
    /// Refresh the bookmark snapshot from Raindrop.io
    Fetch {
        /// Number of bookmarks to request (default: fetch.per_page)
        #[arg(long)]
        per_page: Option<usize>,
    },
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{}", line);
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::new(cli.config.clone())?;
    match &cli.command {
        Commands::Scaffold { month, force } => {
            scaffold_command(&ctx, month.as_deref(), *force, print_line)
        }
        Commands::Email { slug } => email_command(&ctx, slug, print_line),
        Commands::Fetch { per_page } => fetch_command(&ctx, *per_page, print_line),
    }
}

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    diagnostics::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            log_debug!("Command failed: {message}", message: message.as_str());
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
