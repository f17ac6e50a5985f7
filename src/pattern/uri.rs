use url::Url;

use super::EmailPattern;
use crate::address::user_and_domain;

const HOST_METACHARACTERS: &str = "!@#$%^&*()";

/// Stratégie par décomposition URI : l'adresse est lue comme
/// `email://user@host` et doit se réduire exactement à ces deux composants.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriPattern;

impl EmailPattern for UriPattern {
    fn is_valid(&self, email: &str) -> bool {
        // le parseur URL retire silencieusement tabulations et espaces de bord
        if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }
        let Ok(url) = Url::parse(&format!("email://{email}")) else {
            return false;
        };
        if url.port().is_some() {
            return false;
        }
        if url.password().is_some_and(|p| !p.is_empty())
            || url.query().is_some_and(|q| !q.is_empty())
            || url.fragment().is_some_and(|f| !f.is_empty())
            || !url.path().is_empty()
        {
            return false;
        }

        let user = url.username();
        if user.is_empty() || user != user_and_domain(email).0 {
            // userinfo ré-encodé => caractères hors URI (guillemets, '@' en trop...)
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return false;
        }
        !host.contains(|c: char| HOST_METACHARACTERS.contains(c))
    }
}
