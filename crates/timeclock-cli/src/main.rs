use clap::{Parser, Subcommand};

mod commands;
mod submit;

#[derive(Parser)]
#[command(name = "timeclock-cli", version, about = "Workday punch scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate once and submit the due punch, if any
    Once,
    /// Report the decision for given inputs without acting
    Check(commands::check::CheckArgs),
    /// Poll continuously, evaluating every few minutes
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Once => commands::run::once(),
        Commands::Check(args) => commands::check::run(args),
        Commands::Watch => commands::run::watch(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
