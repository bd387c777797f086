use std::{fmt, net::Ipv6Addr};

use thiserror::Error;
use url::{Host, Url};

/// Port every function instance listens on for invocation traffic.
pub const INSTANCE_PORT: u16 = 8080;

/// Scheme used to reach function instances.
pub const INSTANCE_SCHEME: &str = "http";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid instance address {address:?}: {reason}")]
pub struct AddressError {
    pub address: String,
    pub reason: String,
}

/// Routable URL of one selected function instance.
///
/// Renders as `http://<ip-or-host>:8080`, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    url: Url,
    origin: String,
}

impl ResolvedAddress {
    /// Build the instance URL for a candidate address reported by the directory.
    ///
    /// IPv6 literals are bracketed. Anything that does not form a bare
    /// `scheme://host:port` URL is rejected, and so is any host the URL
    /// parser would rewrite into a different one (octal or hex IPv4 parts,
    /// bare integers, IDNA mapping). Only ASCII case folding is tolerated.
    pub fn for_instance(address: &str) -> Result<Self, AddressError> {
        let ipv6 = address.parse::<Ipv6Addr>().ok();
        let host = match ipv6 {
            Some(ip) => format!("[{ip}]"),
            None => address.to_string(),
        };

        let invalid = |reason: String| AddressError {
            address: address.to_string(),
            reason,
        };

        let url = Url::parse(&format!("{INSTANCE_SCHEME}://{host}:{INSTANCE_PORT}"))
            .map_err(|e| invalid(e.to_string()))?;

        let bare = url.host_str().is_some_and(|h| !h.is_empty())
            && url.port() == Some(INSTANCE_PORT)
            && url.username().is_empty()
            && url.password().is_none()
            && url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none();
        if !bare {
            return Err(invalid("not a bare host".to_string()));
        }

        let unchanged = match (ipv6, url.host()) {
            (Some(ip), Some(Host::Ipv6(parsed))) => ip == parsed,
            (None, Some(_)) => url
                .host_str()
                .is_some_and(|h| h == address.to_ascii_lowercase()),
            _ => false,
        };
        if !unchanged {
            return Err(invalid(format!(
                "host normalized to {:?}",
                url.host_str().unwrap_or_default()
            )));
        }

        let origin = url.origin().ascii_serialization();
        Ok(Self { url, origin })
    }

    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.origin
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    #[inline]
    pub fn port(&self) -> u16 {
        INSTANCE_PORT
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin)
    }
}

impl AsRef<str> for ResolvedAddress {
    fn as_ref(&self) -> &str {
        &self.origin
    }
}
