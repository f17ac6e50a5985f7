//! Deliverability checks (network-backed).
//!
//! [`Deliverable`] is the capability shared by every checker. Two
//! implementations ship with the crate:
//! - [`ApiDeliver`] (`with-api` feature) asks a third-party verification API;
//! - [`HostLiveness`] (`with-dns` feature) only checks that the domain resolves.
//!
//! Failures never surface to the caller: they are logged and reported as
//! `deliverable = false`.

#[cfg(feature = "with-api")]
mod api;
mod error;
#[cfg(feature = "with-dns")]
mod liveness;
#[cfg(feature = "with-api")]
mod options;

pub use error::DeliverError;

#[cfg(feature = "with-api")]
pub use api::ApiDeliver;
#[cfg(feature = "with-dns")]
pub use liveness::HostLiveness;
#[cfg(feature = "with-api")]
pub use options::{ApiDeliverOptions, DEFAULT_ENDPOINT};

use std::sync::Arc;

use async_trait::async_trait;

/// Outcome of a deliverability check.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub deliverable: bool,
    /// Identifier reported by the checker (normalized address or bare domain).
    pub address: String,
}

impl Delivery {
    pub fn new(deliverable: bool, address: impl Into<String>) -> Self {
        Self {
            deliverable,
            address: address.into(),
        }
    }
}

#[async_trait]
pub trait Deliverable: Send + Sync {
    /// Resolves exactly once, whatever happens on the network.
    async fn deliver(&self, email: &str) -> Delivery;
}

#[async_trait]
impl<T: Deliverable + ?Sized> Deliverable for Arc<T> {
    async fn deliver(&self, email: &str) -> Delivery {
        (**self).deliver(email).await
    }
}

#[async_trait]
impl<T: Deliverable + ?Sized> Deliverable for Box<T> {
    async fn deliver(&self, email: &str) -> Delivery {
        (**self).deliver(email).await
    }
}
