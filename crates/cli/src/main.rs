mod commands;
mod config;
mod output;
mod progress;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Context;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(
    name = "m365sec",
    version,
    about = "Microsoft 365 security operations from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: <config dir>/m365sec/m365sec.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tenant to act on (required when several are configured)
    #[arg(long, global = true)]
    tenant: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        config_path: cli.config.unwrap_or_else(AppConfig::default_path),
        tenant: cli.tenant,
        json: cli.json,
        yes: cli.yes,
    };

    match cli.command {
        commands::Command::Tenant(args) => commands::tenant::run(&ctx, args).await,
        commands::Command::Alerts(args) => commands::alerts::run(&ctx, args).await,
        commands::Command::Incidents(args) => commands::incidents::run(&ctx, args).await,
        commands::Command::Cases(args) => commands::cases::run(&ctx, args).await,
        commands::Command::Hunt(args) => commands::hunt::run(&ctx, args).await,
        commands::Command::Scores(args) => commands::scores::run(&ctx, args).await,
        commands::Command::Intel(args) => commands::intel::run(&ctx, args).await,
        commands::Command::Get(args) => commands::get::run(&ctx, args).await,
    }
}
