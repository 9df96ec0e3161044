use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;

/// hostconnect: Stripe Connect onboarding for host groups
#[derive(Parser)]
#[command(name = "hostconnect", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Create the database schema
    Migrate(commands::migrate::MigrateArgs),

    /// Issue a bearer token for a user, creating the user if needed
    IssueToken(commands::issue_token::IssueTokenArgs),

    /// Generate a random secret for HOSTCONNECT_SECRET
    Secret,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Secret => commands::secret::run(),
        Commands::Serve(args) => commands::serve::run(&cli.config, args),
        Commands::Migrate(args) => commands::migrate::run(&cli.config, args),
        Commands::IssueToken(args) => commands::issue_token::run(&cli.config, args),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", colored::Colorize::red("error:"), e);
        std::process::exit(1);
    }
}
