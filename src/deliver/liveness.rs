use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use trust_dns_resolver::{TokioAsyncResolver, error::ResolveErrorKind};
use tracing::{debug, warn};

use super::{DeliverError, Deliverable, Delivery};
use crate::address::user_and_domain;

#[async_trait]
pub(crate) trait LookupHost: Send + Sync {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, DeliverError>;
}

#[async_trait]
impl LookupHost for TokioAsyncResolver {
    async fn lookup_host(&self, domain: &str) -> Result<Vec<IpAddr>, DeliverError> {
        match self.lookup_ip(domain).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(err) if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                Ok(Vec::new())
            }
            Err(err) => Err(DeliverError::lookup(domain, err)),
        }
    }
}

/// Coarse existence check: the domain part must resolve to at least one
/// address. The local part is ignored and the reported identifier is the
/// bare domain. A key without `@` is itself taken as the domain.
#[derive(Clone)]
pub struct HostLiveness {
    resolver: Arc<dyn LookupHost>,
}

impl HostLiveness {
    /// Uses the system resolver configuration.
    pub fn new() -> Result<Self, DeliverError> {
        let resolver =
            TokioAsyncResolver::tokio_from_system_conf().map_err(DeliverError::resolver_init)?;
        Ok(Self::from_resolver(resolver))
    }

    pub fn from_resolver(resolver: TokioAsyncResolver) -> Self {
        Self::with_lookup(resolver)
    }

    pub(crate) fn with_lookup<L: LookupHost + 'static>(lookup: L) -> Self {
        Self {
            resolver: Arc::new(lookup),
        }
    }

    pub(crate) async fn host_alive(&self, domain: &str) -> Result<bool, DeliverError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(DeliverError::MissingDomain);
        }
        let addresses = self.resolver.lookup_host(domain).await?;
        debug!(domain, count = addresses.len(), "host resolved");
        Ok(!addresses.is_empty())
    }
}

#[async_trait]
impl Deliverable for HostLiveness {
    async fn deliver(&self, email: &str) -> Delivery {
        let domain = match user_and_domain(email) {
            (host, "") if !email.contains('@') => host,
            (_, domain) => domain,
        };
        let alive = match self.host_alive(domain).await {
            Ok(alive) => alive,
            Err(err) => {
                warn!(email, error = %err, "host liveness check failed");
                false
            }
        };
        Delivery::new(alive, domain)
    }
}
