use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "huskq")]
#[command(about = "Batch render queue for Houdini's husk renderer")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one render job and launch it
    Render(cli::render::RenderArgs),

    /// Print the husk command for one job without launching it
    Preview(cli::preview::PreviewArgs),

    /// Queue every job in a TOML job list and launch them in order
    Batch(cli::batch::BatchArgs),

    /// Show or edit the stored configuration
    Settings {
        #[command(subcommand)]
        action: cli::settings::SettingsAction,
    },

    /// Check that husk is reachable through the configured PATH
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Render(args) => cli::render::render_command(args),
        Commands::Preview(args) => cli::preview::preview_command(args),
        Commands::Batch(args) => cli::batch::batch_command(args),
        Commands::Settings { action } => cli::settings::settings_command(action),
        Commands::Check => cli::check::check_command(),
    }
}
