use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pulse_point_lib::config::ClientConfig;
use pulse_point_lib::types::UsageMetric;
use pulse_point_lib::{commands, to_pretty_json, AppState};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pulse-point")]
#[command(about = "Sentiment analytics dashboard for Pulse Point", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load recent history and print dashboard statistics
    Dashboard,
    /// Print the signed-in user's usage against every quota
    Usage,
    /// Print the quota table
    Limits,
    /// Evaluate one usage count against a tier's quota
    Evaluate {
        /// Subscription tier (free, pro); unknown tiers are treated as free
        tier: String,
        /// Metric to evaluate
        #[arg(value_parser = parse_metric)]
        metric: UsageMetric,
        /// Observed usage count
        current: u64,
    },
}

fn parse_metric(s: &str) -> Result<UsageMetric, String> {
    UsageMetric::ALL
        .into_iter()
        .find(|m| m.as_str() == s.to_lowercase())
        .ok_or_else(|| format!("expected one of analyses, files, urls; got {:?}", s))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", to_pretty_json(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    tracing::info!("Using analysis API at {}", config.api_url);

    let state = AppState::from_config(config).context("Failed to initialize services")?;

    match cli.command {
        Commands::Dashboard => match commands::get_dashboard(&state).await {
            Ok(snapshot) => print_json(&snapshot),
            Err(e) => {
                print_json(&e)?;
                anyhow::bail!("{}", e.message)
            }
        },
        Commands::Usage => match commands::get_usage(&state).await {
            Ok(overview) => print_json(&overview),
            Err(e) => {
                print_json(&e)?;
                anyhow::bail!("{}", e.message)
            }
        },
        Commands::Limits => print_json(&commands::get_usage_limits(&state)),
        Commands::Evaluate {
            tier,
            metric,
            current,
        } => match commands::evaluate_usage(Some(tier), metric, current, &state) {
            Ok(evaluation) => print_json(&evaluation),
            Err(e) => anyhow::bail!("{}", e.message),
        },
    }
}
