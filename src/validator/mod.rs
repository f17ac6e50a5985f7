mod types;

pub use types::ValidationResult;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::deliver::{Deliverable, Delivery};
use crate::pattern::EmailPattern;
use crate::suggest::EmailSuggest;

/// Point d'entrée : combine validation syntaxique, suggestions et
/// délivrabilité.
pub struct EmailValidator {
    pattern: Box<dyn EmailPattern>,
    suggester: Box<dyn EmailSuggest>,
    deliver: Arc<dyn Deliverable>,
}

impl EmailValidator {
    pub fn new<P, S, D>(pattern: P, suggester: S, deliver: D) -> Self
    where
        P: EmailPattern + 'static,
        S: EmailSuggest + 'static,
        D: Deliverable + 'static,
    {
        Self {
            pattern: Box::new(pattern),
            suggester: Box::new(suggester),
            deliver: Arc::new(deliver),
        }
    }

    /// Expression régulière + API de vérification, derrière le cache.
    #[cfg(feature = "with-api")]
    pub fn regex_and_api(
        options: crate::deliver::ApiDeliverOptions,
    ) -> Result<Self, crate::deliver::DeliverError> {
        let api = crate::deliver::ApiDeliver::new(options)?;
        let deliver = crate::cache::CachedDeliver::new(api);
        Ok(Self::new(
            crate::pattern::RegexPattern::default(),
            crate::suggest::PresetSuggester::default(),
            deliver,
        ))
    }

    /// Décomposition URI + résolution DNS du domaine, derrière le cache.
    #[cfg(feature = "with-dns")]
    pub fn uri_and_liveness() -> Result<Self, crate::deliver::DeliverError> {
        let liveness = crate::deliver::HostLiveness::new()?;
        let deliver = crate::cache::CachedDeliver::new(liveness);
        Ok(Self::new(
            crate::pattern::UriPattern,
            crate::suggest::PresetSuggester::default(),
            deliver,
        ))
    }

    pub fn verify(&self, email: &str) -> ValidationResult {
        if self.is_valid(email) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(self.suggest(email))
        }
    }

    /// `false` sans appel réseau si l'adresse est syntaxiquement invalide.
    pub async fn satisfy(&self, email: &str) -> bool {
        if !self.is_valid(email) {
            debug!(email, "rejected by pattern, deliverability skipped");
            return false;
        }
        let delivery = self.deliver.deliver(email).await;
        debug!(
            email,
            reported = %delivery.address,
            deliverable = delivery.deliverable,
            "deliverability answered"
        );
        delivery.deliverable
    }
}

impl EmailPattern for EmailValidator {
    fn is_valid(&self, email: &str) -> bool {
        self.pattern.is_valid(email)
    }

    fn is_illegal(&self, c: char) -> bool {
        self.pattern.is_illegal(c)
    }
}

impl EmailSuggest for EmailValidator {
    fn suggest(&self, email: &str) -> Vec<String> {
        self.suggester.suggest(email)
    }
}

#[async_trait]
impl Deliverable for EmailValidator {
    async fn deliver(&self, email: &str) -> Delivery {
        self.deliver.deliver(email).await
    }
}
