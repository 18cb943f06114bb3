mod cli;
mod handler;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::warn;

use sheetwatch_core::config::{load_dotenv, parse_red_colors};
use sheetwatch_core::Config;
use sheetwatch_notify::WebhookDispatcher;
use sheetwatch_trigger::{evaluate, JsonSnapshot};

use crate::cli::{CliArgs, Command};
use crate::handler::handle_change_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(endpoint) = args.endpoint {
        config.webhook.endpoint_url = Some(endpoint);
    }
    if let Some(secret) = args.secret {
        config.webhook.shared_secret = Some(secret);
    }
    if let Some(ref raw) = args.red_colors {
        config.trigger.red_colors = parse_red_colors(raw);
    }
    config.log_summary();

    match args.command {
        Command::Check { snapshot } => {
            let source = JsonSnapshot::from_file(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            let decision = evaluate(&source, &config.trigger.red_colors)?;
            println!("{decision}");
        }

        Command::Run { snapshot } => {
            let source = JsonSnapshot::from_file(&snapshot)
                .with_context(|| format!("failed to load snapshot {}", snapshot.display()))?;
            let (url, secret) = config.webhook.require()?;
            let dispatcher = WebhookDispatcher::new(url, secret);

            let outcome =
                handle_change_event(&source, &config.trigger.red_colors, &dispatcher).await?;
            if let handler::Outcome::Notified { ref result, .. } = outcome {
                if !result.is_success() {
                    // Delivery failures end the invocation; they are
                    // reported, never retried or escalated.
                    warn!(%result, "notification was not delivered");
                }
            }
            println!("{outcome}");
        }

        Command::TestNotify => {
            let (url, secret) = config.webhook.require()?;
            let dispatcher = WebhookDispatcher::new(url, secret);
            let result = dispatcher.dispatch().await;
            println!("{result}");
            if !result.is_success() {
                bail!("test notification failed: {result}");
            }
        }
    }

    Ok(())
}
