use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser};
use localremo::config::Config;
use localremo::mdns::resolver;
use localremo::{signal_file, RequestScope, ServiceEndpoint, SignalClient};

#[derive(Debug, Parser)]
#[command(name = "localremo", version, about = "Get or send IR signals through a Remo on the local network")]
#[command(group(ArgGroup::new("mode").required(true).args(["get", "post"])))]
struct Cli {
    /// Fetch the last received signal and save it to this file
    #[arg(long, value_name = "PATH")]
    get: Option<PathBuf>,

    /// Send the signal stored in this file
    #[arg(long, value_name = "PATH")]
    post: Option<PathBuf>,

    /// Debug logging, including the discovered service record
    #[arg(long)]
    debug: bool,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "localremo=debug" } else { "localremo=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter))
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let endpoint = resolver::discover(
        &config.discovery.service_type,
        &config.discovery.domain,
        config.discovery.timeout(),
    )
    .await
    .context("Couldn't get local Remo address")?
    .ok_or_else(|| anyhow!("Couldn't get local Remo address: no device answered within {:?}", config.discovery.timeout()))?;

    log_endpoint(&endpoint);

    let target = endpoint
        .http_target()
        .context("Discovered device has no IPv4 address")?;

    let client = SignalClient::new()?;
    let scope = RequestScope::with_timeout(config.http.timeout());

    let interrupt = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            interrupt.cancel();
        }
    });

    if let Some(path) = &cli.get {
        let signal = client
            .fetch_signal(&scope, target)
            .await
            .context("Failed to GET")?;
        signal_file::write_signal(path, &signal).context("Failed to save signal")?;
        tracing::info!("Saved signal from {} to {}", target, path.display());
    } else if let Some(path) = &cli.post {
        let file = signal_file::read_signal(path).context("Couldn't read file")?;
        client
            .submit_signal(&scope, target, file.into_bytes())
            .await
            .context("Failed to POST")?;
        tracing::info!("Sent {} to {}", path.display(), target);
    }

    println!("DONE!");
    Ok(())
}

fn log_endpoint(endpoint: &ServiceEndpoint) {
    tracing::debug!("ServiceRecord: {} ({})", endpoint.instance_name, endpoint.service_type);
    tracing::debug!("Service HostName: {}", endpoint.hostname);
    tracing::debug!("Service Port: {}", endpoint.port);
    tracing::debug!("Service Text: {:?}", endpoint.txt);
    tracing::debug!("Service TTL: {}", endpoint.ttl);
    tracing::debug!("Service AddrIPv4: {:?}", endpoint.ipv4());
    tracing::debug!("Service AddrIPv6: {:?}", endpoint.ipv6().collect::<Vec<_>>());
}
