use fnroute_model::{FunctionRef, NAMESPACE_SEPARATOR, ResolvedAddress};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    config::ResolverConfig,
    directory::EndpointDirectory,
    error::ResolveError,
    policy::NamespacePolicy,
    poll,
    select::{Selector, UniformSelector},
};

/// Turns a function name into the URL of one ready instance.
///
/// Holds only immutable state, so a single resolver can serve concurrent
/// callers without locking. Every call performs a fresh directory lookup.
pub struct Resolver<D> {
    directory: D,
    config: ResolverConfig,
    policy: NamespacePolicy,
    selector: Box<dyn Selector>,
}

impl<D> Resolver<D>
where
    D: EndpointDirectory,
{
    /// Create a resolver with the default namespace policy and uniform selection.
    pub fn new(directory: D, config: ResolverConfig) -> Result<Self, ResolveError> {
        config.validate()?;
        Ok(Self {
            directory,
            config,
            policy: NamespacePolicy::default(),
            selector: Box::new(UniformSelector),
        })
    }

    #[inline]
    pub fn with_policy(mut self, policy: NamespacePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn with_selector<S: Selector>(mut self, selector: S) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Resolve `name` (`<function>` or `<function>.<namespace>`) to `http://<address>:8080`.
    pub async fn resolve(&self, name: &str) -> Result<ResolvedAddress, ResolveError> {
        self.resolve_with_cancel(name, &CancellationToken::new()).await
    }

    /// Same as [`Resolver::resolve`], aborting between attempts once `cancel` fires.
    #[instrument(level = "debug", skip(self, cancel), fields(retry_count = self.config.retry_count))]
    pub async fn resolve_with_cancel(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedAddress, ResolveError> {
        let function = FunctionRef::parse(name, &self.config.default_namespace);
        self.policy.verify(function.namespace())?;

        if function.name().contains(NAMESPACE_SEPARATOR) {
            return Err(ResolveError::InvalidFunctionName {
                name: name.to_string(),
            });
        }

        let ready = poll::resolve_ready_set(&self.directory, &function, &self.config, cancel).await?;

        let address = self
            .selector
            .select(&ready)
            .and_then(|idx| ready.get(idx))
            .ok_or_else(|| ResolveError::no_route(&function))?;

        let resolved = ResolvedAddress::for_instance(address)?;
        debug!(%function, url = %resolved, candidates = ready.len(), "function resolved");
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc, time::Duration};

    use fnroute_model::ReadySet;
    use tokio::time::Instant;

    use super::*;
    use crate::{error::DirectoryError, select::SeededSelector, testing::ScriptedDirectory};

    fn config() -> ResolverConfig {
        ResolverConfig::new()
            .with_default_namespace("openfaas-fn")
            .with_retry_count(3)
            .with_retry_interval(Duration::from_millis(10))
    }

    struct NoPick;

    impl Selector for NoPick {
        fn select(&self, _set: &ReadySet) -> Option<usize> {
            None
        }
    }

    struct OutOfRange;

    impl Selector for OutOfRange {
        fn select(&self, set: &ReadySet) -> Option<usize> {
            Some(set.len())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_qualified_name_on_first_attempt() {
        let dir = Arc::new(ScriptedDirectory::ready(&["10.0.0.5"]));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();
        let started = Instant::now();

        let url = resolver.resolve("hello.openfaas-fn").await.unwrap();

        assert_eq!(url.to_string(), "http://10.0.0.5:8080");
        assert_eq!(dir.call_count(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn unqualified_name_uses_default_namespace() {
        let dir = Arc::new(ScriptedDirectory::ready(&["10.0.0.9"]));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();

        resolver.resolve("figlet").await.unwrap();

        assert_eq!(
            dir.calls(),
            vec![("openfaas-fn".to_string(), "figlet".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn directory_only_sees_bare_names() {
        let dir = Arc::new(ScriptedDirectory::ready(&["127.0.0.1"]));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();

        for name in ["figlet", "figlet.openfaas-fn", "nodeinfo.staging", "env.default"] {
            let url = resolver.resolve(name).await.unwrap();
            assert_eq!(url.as_str(), "http://127.0.0.1:8080");
        }

        for (_, function) in dir.calls() {
            assert!(!function.contains('.'), "directory saw {function:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn multi_dot_name_is_rejected_before_lookup() {
        let dir = Arc::new(ScriptedDirectory::ready(&["127.0.0.1"]));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();

        let err = resolver.resolve("a.b.c").await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidFunctionName { .. }));
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reserved_namespace_never_reaches_directory() {
        let dir = Arc::new(ScriptedDirectory::ready(&["10.0.0.5"]));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();

        let err = resolver.resolve("admin.kube-system").await.unwrap_err();

        assert_eq!(err.to_string(), "namespace not allowed");
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_policy_is_applied() {
        let dir = Arc::new(ScriptedDirectory::ready(&["10.0.0.5"]));
        let resolver = Resolver::new(Arc::clone(&dir), config())
            .unwrap()
            .with_policy(NamespacePolicy::allow(["openfaas-fn"]));

        assert!(resolver.resolve("hello").await.is_ok());
        let err = resolver.resolve("hello.staging").await.unwrap_err();
        assert!(matches!(err, ResolveError::ForbiddenNamespace { .. }));
        assert_eq!(dir.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_after_retry_count_queries() {
        let dir = Arc::new(ScriptedDirectory::never_ready());
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();
        let started = Instant::now();

        let err = resolver.resolve("hello").await.unwrap_err();

        assert_eq!(err.to_string(), "max status retrieve count 3 exceeded");
        assert_eq!(dir.call_count(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(20) && elapsed < Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn directory_error_wrapped_with_identity() {
        let dir = Arc::new(ScriptedDirectory::failing(DirectoryError::NotFound {
            namespace: "openfaas-fn".into(),
            name: "missing".into(),
        }));
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();

        let err = resolver.resolve("missing").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "error listing \"missing.openfaas-fn\": endpoints \"missing\" not found in namespace \"openfaas-fn\""
        );
        assert_eq!(dir.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_is_reported_distinctly() {
        let dir = Arc::new(ScriptedDirectory::never_ready());
        let resolver = Resolver::new(Arc::clone(&dir), config()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = resolver
            .resolve_with_cancel("hello", &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn selector_failures_surface_as_no_route() {
        let resolver = Resolver::new(ScriptedDirectory::ready(&["10.0.0.5"]), config())
            .unwrap()
            .with_selector(NoPick);
        let err = resolver.resolve("hello").await.unwrap_err();
        assert!(matches!(err, ResolveError::NoRouteResolved { .. }));

        let resolver = Resolver::new(ScriptedDirectory::ready(&["10.0.0.5"]), config())
            .unwrap()
            .with_selector(OutOfRange);
        let err = resolver.resolve("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "no route resolved for \"hello.openfaas-fn\"");
    }

    #[tokio::test(start_paused = true)]
    async fn unroutable_address_is_rejected() {
        let resolver = Resolver::new(ScriptedDirectory::ready(&["not a host"]), config()).unwrap();
        let err = resolver.resolve("hello").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidAddress(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn octal_looking_address_is_not_rewritten() {
        let resolver = Resolver::new(ScriptedDirectory::ready(&["010.0.0.5"]), config()).unwrap();
        let err = resolver.resolve("hello").await.unwrap_err();
        assert!(matches!(err, ResolveError::InvalidAddress(ref e) if e.address == "010.0.0.5"));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_resolutions_spread_across_candidates() {
        let candidates = ["10.0.0.1", "10.0.0.2", "10.0.0.3"];
        let resolver = Resolver::new(ScriptedDirectory::ready(&candidates), config())
            .unwrap()
            .with_selector(SeededSelector::new(2024));

        let mut hits: HashMap<String, usize> = HashMap::new();
        for _ in 0..6_000 {
            let url = resolver.resolve("hello").await.unwrap();
            *hits.entry(url.host().to_string()).or_default() += 1;
        }

        assert_eq!(hits.len(), candidates.len());
        for (host, count) in hits {
            assert!((1_700..=2_300).contains(&count), "{host} selected {count} times");
        }
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let result = Resolver::new(
            ScriptedDirectory::never_ready(),
            config().with_retry_count(0),
        );
        assert!(matches!(result, Err(ResolveError::InvalidConfig(_))));
    }

    #[test]
    fn resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver<ScriptedDirectory>>();
    }
}
