use crate::config::HouraiConfig;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::debug;

pub fn init(config: &HouraiConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    debug!("Loaded Config: {:?}", redacted(config));

    if let Some(metrics_port) = config.metrics.port {
        let socket = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), metrics_port);
        PrometheusBuilder::new()
            .with_http_listener(socket)
            .install()?;

        debug!(
            "Metrics endpoint listening on http://0.0.0.0:{}",
            metrics_port
        );
    }

    Ok(())
}

pub fn http_client(config: &HouraiConfig, token: String) -> twilight_http::Client {
    debug!("Creating Discord HTTP client");
    // Use the twilight HTTP proxy when configured
    if let Some(proxy) = config.discord.proxy.as_ref() {
        twilight_http::Client::builder()
            .token(token)
            .proxy(proxy.clone(), true)
            .ratelimiter(None)
            .build()
    } else {
        twilight_http::Client::new(token)
    }
}

fn redacted(config: &HouraiConfig) -> HouraiConfig {
    let mut config = config.clone();
    if config.discord.bot_token.is_some() {
        config.discord.bot_token = Some(String::from("<redacted>"));
    }
    config
}
