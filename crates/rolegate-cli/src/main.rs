//! # rolegate CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

/// Role request workflow CLI.
///
/// Seeds users, zones, and products, submits elevation and swap requests,
/// and applies admin review decisions against a JSON state file.
#[derive(Parser, Debug)]
#[command(name = "rolegate", version, about)]
struct Cli {
    /// Path to the JSON state file.
    #[arg(long, global = true, default_value = "rolegate-state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create users, zones, and products.
    Seed(rolegate_cli::seed::SeedArgs),
    /// Submit an elevation or swap request.
    Submit(rolegate_cli::submit::SubmitArgs),
    /// Approve or reject a pending request.
    Review(rolegate_cli::review::ReviewArgs),
    /// Print one request.
    Show(rolegate_cli::show::ShowArgs),
    /// Print users, requests, or profiles.
    List(rolegate_cli::show::ListArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed(args) => rolegate_cli::seed::run(&args, &cli.state),
        Commands::Submit(args) => rolegate_cli::submit::run(&args, &cli.state),
        Commands::Review(args) => rolegate_cli::review::run(&args, &cli.state),
        Commands::Show(args) => rolegate_cli::show::run_show(&args, &cli.state),
        Commands::List(args) => rolegate_cli::show::run_list(&args, &cli.state),
    }
}
