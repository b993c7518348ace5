mod sentiment;
mod session;

use clap::Parser;
use newsmood_core::ConfigError;
use tracing_subscriber::EnvFilter;

use crate::sentiment::SentimentCommands;

#[derive(Debug, Parser)]
#[command(name = "newsmood")]
#[command(about = "Financial news headline sentiment analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Option<SentimentCommands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!(
            "Enter a company name or ticker, e.g. `newsmood analyze {}`, to begin.",
            sentiment::DEFAULT_QUERY
        );
        return Ok(());
    };

    // Credentials are checked before anything touches the network.
    let config = newsmood_core::load_app_config().map_err(describe_config_error)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match command {
        SentimentCommands::Analyze {
            query,
            lookback_days,
            format,
            classifier,
        } => sentiment::run_analyze(&config, &query, lookback_days, format, classifier).await,
        SentimentCommands::Interactive {
            lookback_days,
            format,
            classifier,
        } => sentiment::run_interactive(&config, lookback_days, format, classifier).await,
    }
}

fn describe_config_error(err: ConfigError) -> anyhow::Error {
    match err {
        ConfigError::MissingEnvVar(var) if var == "NEWSAPI_KEY" => anyhow::anyhow!(
            "API key not found. Set NEWSAPI_KEY in the environment or in a .env file."
        ),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests;
