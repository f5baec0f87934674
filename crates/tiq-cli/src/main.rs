#![forbid(unsafe_code)]

mod backend;
mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tiq: AI-classified support-ticket dashboard",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List tickets with filtering and search",
        after_help = "EXAMPLES:\n    # All tickets\n    tiq list\n\n    # Pending tickets mentioning billing\n    tiq list --filter pending --search factura\n\n    # Emit machine-readable output\n    tiq list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Dashboard counters and week-over-week trends",
        after_help = "EXAMPLES:\n    # Show the dashboard numbers\n    tiq stats\n\n    # Emit machine-readable output\n    tiq stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Monday-to-Sunday activity for the current week",
        after_help = "EXAMPLES:\n    # This week's activity chart\n    tiq trends\n\n    # Emit machine-readable output\n    tiq trends --json"
    )]
    Trends(cmd::trends::TrendsArgs),

    #[command(
        next_help_heading = "Actions",
        about = "Create a new support ticket",
        after_help = "EXAMPLES:\n    # Let the service classify it later\n    tiq create --description \"No puedo acceder a mi cuenta\"\n\n    # Pre-classified\n    tiq create -d \"Factura duplicada\" --category facturación --sentiment negativo"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Actions",
        about = "Request AI classification for an existing ticket",
        after_help = "EXAMPLES:\n    # Classify one ticket\n    tiq process 550e8400-e29b-41d4-a716-446655440000"
    )]
    Process(cmd::process::ProcessArgs),

    #[command(
        next_help_heading = "Actions",
        about = "Classify a text without creating a ticket",
        after_help = "EXAMPLES:\n    # Ad-hoc classification\n    tiq analyze \"Mi factura está incorrecta\""
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Live",
        about = "Stream store changes into a live board",
        after_help = "EXAMPLES:\n    # Follow changes, polling every 5s\n    tiq watch\n\n    # One poll cycle, machine-readable\n    tiq watch --once --json"
    )]
    Watch(cmd::watch::WatchArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TIQ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tiq=debug,info"
        } else {
            "tiq=info,warn"
        })
    });

    let format = env::var("TIQ_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.format, cli.json);
    let file_config = tiq_core::config::load_user_config()?;
    let config = tiq_core::config::resolve_config(&file_config);

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &config),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &config),
        Commands::Trends(ref args) => cmd::trends::run_trends(args, output, &config),
        Commands::Create(ref args) => cmd::create::run_create(args, output, &config),
        Commands::Process(ref args) => cmd::process::run_process(args, output, &config),
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output, &config),
        Commands::Watch(ref args) => cmd::watch::run_watch(args, output, &config),
    }
}
