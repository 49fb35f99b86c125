mod profile;
mod report;

use clap::{Parser, Subcommand};
use localbench_core::AnalysisRequest;
use localbench_gemini::{analyze_competitors, GeminiClient, GeminiConfig};
use tracing_subscriber::EnvFilter;

use crate::profile::ProfileArgs;

#[derive(Debug, Parser)]
#[command(name = "localbench")]
#[command(about = "Benchmark a local business against its nearby competitors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the prompt that would be sent for a profile, without sending it.
    Prompt {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Run the competitor analysis and print the report.
    Analyze {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Emit the raw outcome as JSON instead of the rendered report.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Prompt { profile } => {
            let profile = profile.resolve()?;
            let request =
                AnalysisRequest::for_profile(&profile, localbench_core::DEFAULT_TEMPERATURE);
            println!("{}", request.prompt);
        }
        Commands::Analyze { profile, json } => {
            let profile = profile.resolve()?;
            let config = localbench_core::load_app_config()?;
            let client = GeminiClient::new(&GeminiConfig::from_app_config(&config))?;

            tracing::info!(
                business = %profile.business_name,
                model = %client.model(),
                "running analysis"
            );
            let outcome = analyze_competitors(&client, &profile).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                report::print_report(&outcome);
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so `prompt` and `analyze --json` output stays pipeable.
fn init_tracing() -> anyhow::Result<()> {
    let fallback = std::env::var("LOCALBENCH_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests;
