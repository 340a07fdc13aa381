use anyhow::Context;
use clap::Parser;
use hangouts_notify::configuration::{Category, NotifierConfig};
use hangouts_notify::notifications::HangoutsNotifier;
use hangouts_notify::telemetry::{get_subscriber, init_subscriber};
use hangouts_notify::traits::TracingLog;
use hangouts_notify::transport::ReqwestConnector;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Send a single notification to a Google Chat webhook
#[derive(Parser, Debug)]
#[command(name = "hangouts-notify", version)]
struct Cli {
    /// Configuration category file (JSON) holding `webhook` and `text`
    #[arg(short, long)]
    config: PathBuf,

    /// Name of the notification
    #[arg(short, long)]
    name: String,

    /// Trigger reason document, e.g. {"reason": "triggered"}
    #[arg(short, long, default_value = "{}")]
    reason: String,

    /// Message body
    #[arg(short, long)]
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let subscriber = get_subscriber("hangouts-notify".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let text = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read configuration file {}", cli.config.display()))?;
    let category = Category::parse("hangouts", &text).context("Failed to parse configuration")?;
    let config = NotifierConfig::from_category(&category).context("Incomplete configuration")?;

    let notifier = HangoutsNotifier::new(
        &config,
        Arc::new(ReqwestConnector::new()),
        Arc::new(TracingLog::new()),
    );

    if notifier.notify(&cli.name, &cli.reason, &cli.message).await {
        info!("Notification {} sent", cli.name);
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
