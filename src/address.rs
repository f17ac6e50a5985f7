/// Découpe une adresse en `(user, domain)` sur le **dernier** `@`.
///
/// Sans `@`, le domaine est vide et l'utilisateur est la chaîne entière.
pub fn user_and_domain(email: &str) -> (&str, &str) {
    email.rsplit_once('@').unwrap_or((email, ""))
}

/// Recompose `user@domain`.
pub(crate) fn join(user: &str, domain: &str) -> String {
    format!("{user}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_at() {
        assert_eq!(user_and_domain("a@b@c.com"), ("a@b", "c.com"));
        assert_eq!(user_and_domain("alex@gmail.com"), ("alex", "gmail.com"));
    }

    #[test]
    fn missing_at_gives_empty_domain() {
        assert_eq!(user_and_domain("gmail.com"), ("gmail.com", ""));
        assert_eq!(user_and_domain(""), ("", ""));
    }

    #[test]
    fn trailing_at() {
        assert_eq!(user_and_domain("alex@"), ("alex", ""));
        assert_eq!(join("alex", "gmail.com"), "alex@gmail.com");
    }
}
