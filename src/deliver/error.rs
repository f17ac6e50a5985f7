use thiserror::Error;

/// Internal failures of a deliverability check. They are logged, then
/// conflated into `deliverable = false` by the [`Deliverable`](super::Deliverable)
/// implementations; only constructors return them.
#[derive(Debug, Error)]
pub enum DeliverError {
    #[error("domain is empty")]
    MissingDomain,
    #[cfg(feature = "with-api")]
    #[error("HTTP request failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[cfg(feature = "with-api")]
    #[error("malformed verification response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
    #[error("verification service reported failure")]
    Unsuccessful,
    #[cfg(feature = "with-dns")]
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[cfg(feature = "with-dns")]
    #[error("host lookup failed for {domain}: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl DeliverError {
    #[cfg(feature = "with-api")]
    pub(crate) fn http(source: reqwest::Error) -> Self {
        Self::Http { source }
    }

    #[cfg(feature = "with-api")]
    pub(crate) fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn resolver_init(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::ResolverInit { source }
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn lookup(
        domain: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Lookup {
            domain: domain.into(),
            source,
        }
    }
}
