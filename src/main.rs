use anyhow::Context;
use clap::Parser;
use fanout_redeem::utils::{logger, validation::Validate};
use fanout_redeem::{CliConfig, ConfigProvider, ContentLengthAggregator, FanoutError, ReqwestHttpClient};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("CLI config: {:?}", config);

    let client = match config.user_agent() {
        Some(user_agent) => ReqwestHttpClient::with_user_agent(user_agent)
            .context("failed to build HTTP client")?,
        None => ReqwestHttpClient::new(),
    };
    let aggregator = ContentLengthAggregator::new(client);

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(&cancel, config.timeout_seconds());

    match aggregator.sum_content_length(config.urls(), &cancel).await {
        Ok(total) => {
            if config.json {
                let report = serde_json::json!({
                    "urls": config.urls().len(),
                    "content_length": total,
                });
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", total);
            }
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Ctrl-C and the optional deadline both cancel the shared token.
fn spawn_cancel_triggers(cancel: &CancellationToken, timeout_seconds: Option<u64>) {
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling outstanding requests");
            on_signal.cancel();
        }
    });

    if let Some(seconds) = timeout_seconds {
        let on_deadline = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            tracing::warn!("Timed out after {}s, cancelling outstanding requests", seconds);
            on_deadline.cancel();
        });
    }
}

fn report_failure(e: &FanoutError) {
    tracing::error!("Aggregation failed: {} (category: {:?})", e, e.category());
    eprintln!("{}", e.user_friendly_message());
}
