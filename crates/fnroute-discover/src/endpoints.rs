//! Subset of the Kubernetes `v1/Endpoints` and `v1/Status` objects the resolver reads.
use fnroute_model::ReadySet;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Endpoints {
    #[serde(default)]
    subsets: Option<Vec<EndpointSubset>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointSubset {
    #[serde(default)]
    addresses: Option<Vec<EndpointAddress>>,
    #[serde(default)]
    not_ready_addresses: Option<Vec<EndpointAddress>>,
}

#[derive(Debug, Deserialize)]
struct EndpointAddress {
    ip: String,
}

impl Endpoints {
    /// Ready addresses of the first subset; later subsets are not merged.
    pub(crate) fn ready_set(&self) -> ReadySet {
        self.subsets
            .as_deref()
            .and_then(<[EndpointSubset]>::first)
            .and_then(|subset| subset.addresses.as_deref())
            .map(|addresses| addresses.iter().map(|a| a.ip.clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn not_ready_count(&self) -> usize {
        self.subsets
            .as_deref()
            .and_then(<[EndpointSubset]>::first)
            .and_then(|subset| subset.not_ready_addresses.as_deref())
            .map_or(0, <[EndpointAddress]>::len)
    }
}

/// Error body returned by the API server on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStatus {
    #[serde(default)]
    pub(crate) message: Option<String>,
}
