//! Readiness polling against the endpoint directory.
//!
//! One resolution runs at most `retry_count` queries:
//! - a directory error ends the loop immediately;
//! - a non-empty ready set ends the loop immediately;
//! - an empty ready set waits `retry_interval` and queries again, except after the last attempt.
//!
//! Cancellation is observed before every query and during every wait.
use fnroute_model::{FunctionRef, ReadySet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{config::ResolverConfig, directory::EndpointDirectory, error::ResolveError};

pub async fn resolve_ready_set<D>(
    directory: &D,
    function: &FunctionRef,
    config: &ResolverConfig,
    cancel: &CancellationToken,
) -> Result<ReadySet, ResolveError>
where
    D: EndpointDirectory + ?Sized,
{
    config.validate()?;
    let attempts = config.retry_count;

    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            return Err(ResolveError::cancelled(function));
        }

        debug!(%function, attempt, "querying endpoint directory");
        let ready = directory
            .fetch(function.namespace(), function.name())
            .await
            .map_err(|source| ResolveError::directory(function, source))?;

        if !ready.is_empty() {
            debug!(%function, attempt, candidates = ready.len(), "function is ready");
            return Ok(ready);
        }

        if attempt == attempts {
            warn!(%function, attempt, "function is not ready, giving up");
            break;
        }

        // Instances may still be starting (e.g. restored from a checkpoint).
        warn!(
            %function,
            attempt,
            retry_interval = ?config.retry_interval,
            "function is not ready, waiting"
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResolveError::cancelled(function)),
            _ = tokio::time::sleep(config.retry_interval) => {}
        }
    }

    Err(ResolveError::ExhaustedRetries { attempts })
}
