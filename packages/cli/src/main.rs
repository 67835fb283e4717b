mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{decode, init, path, replay, DecodeArgs, InitArgs, PathArgs, ReplayArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// builder-sync - inspect and replay builder location sync
#[derive(Parser, Debug)]
#[command(name = "builder-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and an example scenario
    Init(InitArgs),

    /// Decode a location into page, hash and mode
    Decode(DecodeArgs),

    /// Build the location for a page, hash and mode
    Path(PathArgs),

    /// Replay scripted sessions against in-memory history
    Replay(ReplayArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config = Config::load(&cwd)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Decode(args) => decode(args),
        Command::Path(args) => path(args, &config),
        Command::Replay(args) => replay(args, &config),
    }
}
