//! Resolve function names given on the command line against a live cluster.
//!
//! ```text
//! FNROUTE_API_SERVER=http://127.0.0.1:8001 lookup figlet nodeinfo.staging
//! ```
//! Without `FNROUTE_API_SERVER` the in-cluster service account is used.
use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use fnroute_core::{CancellationToken, Resolver, ResolverConfig};
use fnroute_discover::{KubeConfig, KubeEndpoints};
use fnroute_observe::{LoggerConfig, logger_init};

const ENV_API_SERVER: &str = "FNROUTE_API_SERVER";
const ENV_API_TOKEN: &str = "FNROUTE_API_TOKEN";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let log_cfg = LoggerConfig::from_env()?;
    logger_init(&log_cfg)?;

    let names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        bail!("usage: lookup <function>[.<namespace>]...");
    }

    // 2) Resolver settings
    let config = ResolverConfig::from_env()?;
    info!(
        "resolver configured: default_namespace={}, retry_count={}, retry_interval={:?}",
        config.default_namespace, config.retry_count, config.retry_interval
    );

    // 3) Endpoint directory
    let kube = match std::env::var(ENV_API_SERVER) {
        Ok(api_server) => KubeConfig {
            api_server,
            token: std::env::var(ENV_API_TOKEN).ok(),
            ..Default::default()
        },
        Err(_) => KubeConfig::in_cluster().context("in-cluster kube config")?,
    };
    info!("endpoint directory: {:?}", kube);
    let directory = KubeEndpoints::new(kube)?;

    let resolver = Arc::new(Resolver::new(directory, config)?);

    // 4) Ctrl+C aborts pending retries
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling pending lookups");
            trigger.cancel();
        }
    });

    // 5) Resolve every name concurrently
    let mut lookups = JoinSet::new();
    for name in names {
        let resolver = Arc::clone(&resolver);
        let cancel = cancel.clone();
        lookups.spawn(async move {
            let result = resolver.resolve_with_cancel(&name, &cancel).await;
            (name, result)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = lookups.join_next().await {
        let (name, result) = joined?;
        match result {
            Ok(url) => println!("{name}\t{url}"),
            Err(e) => {
                error!("{name}: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} lookup(s) failed");
    }
    Ok(())
}
