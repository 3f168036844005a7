use std::process::ExitCode;

use postern_client::ServiceClient;
use postern_core::config::load_config;
use postern_transport::{CancellationToken, TransportError, TransportOptions};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let options = TransportOptions::from_settings(&config)?;
    let client = ServiceClient::with_options(options, config.service.url.clone())?;

    let mut body = String::new();
    tokio::io::stdin().read_to_string(&mut body).await?;
    let request = client.post(body)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            ctrl_c.cancel();
        }
    });

    let response = match client.transport().send(request, &cancel).await {
        Ok(response) => response,
        Err(TransportError::Status(response)) => *response,
        Err(err) => return Err(err.into()),
    };

    let status = response.status();
    println!("{status} {}", response.reason());
    println!("{}", response.text().await?);

    Ok(if (200..300).contains(&status) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
