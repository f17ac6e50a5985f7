use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{DeliverError, Deliverable, Delivery, options::ApiDeliverOptions};
use crate::address::{join, user_and_domain};

// query-allowed set, minus ";/?:@&=+$"
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    domain: Option<String>,
}

/// Asks a remote verification API whether a mailbox accepts mail.
///
/// The endpoint receives `GET <endpoint>?email=<address>&apikey=<key>` and
/// answers `{"success": bool, "result": "deliverable" | ..., "user"?, "domain"?}`.
#[derive(Debug, Clone)]
pub struct ApiDeliver {
    client: reqwest::Client,
    options: ApiDeliverOptions,
}

impl ApiDeliver {
    pub fn new(options: ApiDeliverOptions) -> Result<Self, DeliverError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DeliverError::http)?;
        Ok(Self { client, options })
    }

    /// Overrides the HTTP client.
    pub fn with_client(client: reqwest::Client, options: ApiDeliverOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &ApiDeliverOptions {
        &self.options
    }

    pub(crate) fn request_url(&self, email: &str) -> String {
        format!(
            "{}?email={}&apikey={}",
            self.options.endpoint,
            utf8_percent_encode(email, QUERY_VALUE),
            utf8_percent_encode(&self.options.api_key, QUERY_VALUE),
        )
    }

    async fn request_validation(
        &self,
        email: &str,
        user: &str,
        domain: &str,
    ) -> Result<Delivery, DeliverError> {
        let response = self
            .client
            .get(self.request_url(email))
            .send()
            .await
            .map_err(DeliverError::http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliverError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(DeliverError::http)?;
        parse_verification(&body, user, domain)
    }
}

/// Decodes a verification body. Server-side `user`/`domain` override the
/// requested parts in the reported address.
pub(crate) fn parse_verification(
    body: &[u8],
    user: &str,
    domain: &str,
) -> Result<Delivery, DeliverError> {
    let parsed: VerifyResponse = serde_json::from_slice(body).map_err(DeliverError::decode)?;
    if !parsed.success {
        return Err(DeliverError::Unsuccessful);
    }
    let deliverable = parsed.result.as_deref() == Some("deliverable");
    let user = parsed.user.as_deref().unwrap_or(user);
    let domain = parsed.domain.as_deref().unwrap_or(domain);
    Ok(Delivery::new(deliverable, join(user, domain)))
}

#[async_trait]
impl Deliverable for ApiDeliver {
    async fn deliver(&self, email: &str) -> Delivery {
        let (user, domain) = user_and_domain(email);
        match self.request_validation(email, user, domain).await {
            Ok(delivery) => {
                debug!(
                    email,
                    deliverable = delivery.deliverable,
                    reported = %delivery.address,
                    "verification API answered"
                );
                delivery
            }
            Err(err) => {
                warn!(email, error = %err, "verification API lookup failed");
                Delivery::new(false, join(user, domain))
            }
        }
    }
}
