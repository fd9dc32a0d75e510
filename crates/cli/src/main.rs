//! Haven CLI - Console front-end for the shelter backend
//!
//! Usage:
//!   haven                 - Start the interactive menu
//!   haven demo            - Seed demo data and print a tour of the system
//!
//! Everything lives in memory: state exists for the duration of one run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cli::app::App;
use cli::commands::DemoCommand;
use cli::interactive::InteractiveCli;
use shared::HavenConfig;

#[derive(Parser)]
#[command(name = "haven")]
#[command(about = "Haven - Animal shelter management console")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "haven.json")]
    config: PathBuf,

    /// Preload demo data before starting
    #[arg(long, global = true)]
    seed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed demo data and print a guided tour
    Demo(DemoCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = HavenConfig::load_or_default(&cli.config)?;
    let mut app = App::new(config);
    if cli.seed {
        app.seed_demo()?;
    }

    match cli.command {
        Some(Commands::Demo(cmd)) => cmd.run(app),
        None => InteractiveCli::new(app).run(),
    }
}
