//! Autocomplétion du domaine à partir d'une liste de domaines connus.

/// Domaines proposés par défaut, dans l'ordre d'affichage.
pub const DEFAULT_PRESET: [&str; 8] = [
    "gmail.com",
    "yahoo.com",
    "ymail.com",
    "yahoo.co.uk",
    "gmail.co.uk",
    "yahoo.ca",
    "gmail.ca",
    "github.com",
];

pub trait EmailSuggest: Send + Sync {
    /// Domaines candidats pour une saisie partielle.
    fn suggest(&self, email: &str) -> Vec<String>;
}

/// Suggestions par préfixe sur un preset immuable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSuggester {
    preset: Vec<String>,
}

impl Default for PresetSuggester {
    fn default() -> Self {
        Self::new(DEFAULT_PRESET)
    }
}

impl PresetSuggester {
    pub fn new<I, S>(preset: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preset: preset.into_iter().map(Into::into).collect(),
        }
    }

    pub fn preset(&self) -> &[String] {
        &self.preset
    }

    /// Adresses complètes (`user@domaine`) pour chaque domaine suggéré.
    pub fn complete(&self, email: &str) -> Vec<String> {
        let Some((user, _)) = email.split_once('@') else {
            return Vec::new();
        };
        self.suggest(email)
            .into_iter()
            .map(|domain| format!("{user}@{domain}"))
            .collect()
    }
}

impl EmailSuggest for PresetSuggester {
    fn suggest(&self, email: &str) -> Vec<String> {
        // coupe sur le premier '@', contrairement à `user_and_domain`
        let Some((user, domain)) = email.split_once('@') else {
            return Vec::new();
        };
        if user.is_empty() {
            return Vec::new();
        }
        if domain.is_empty() {
            return self.preset.clone();
        }
        self.preset
            .iter()
            .filter(|candidate| candidate.starts_with(domain) && candidate.as_str() != domain)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn suggester() -> PresetSuggester {
        PresetSuggester::default()
    }

    #[test]
    fn bare_at_returns_whole_preset() {
        let out = suggester().suggest("test@");
        assert_eq!(out, DEFAULT_PRESET.to_vec());
    }

    #[test]
    fn prefix_filters_in_preset_order() {
        let s = suggester();
        assert_eq!(
            s.suggest("test@g"),
            vec!["gmail.com", "gmail.co.uk", "gmail.ca", "github.com"]
        );
        assert_eq!(s.suggest("test@gi"), vec!["github.com"]);
        assert_eq!(s.suggest("test@y"), vec![
            "yahoo.com",
            "ymail.com",
            "yahoo.co.uk",
            "yahoo.ca"
        ]);
        assert!(s.suggest("test@yfejkwfjefl.com").is_empty());
    }

    #[test]
    fn no_duplicate_of_complete_domain() {
        let s = suggester();
        assert!(s.suggest("email@gmail.com").is_empty());
        assert_eq!(s.suggest("email@gmail.c"), vec![
            "gmail.com",
            "gmail.co.uk",
            "gmail.ca"
        ]);
    }

    #[test]
    fn nothing_without_user_or_at() {
        let s = suggester();
        for input in ["gmail.com", "@gmail.com", "", "@", "username"] {
            assert!(s.suggest(input).is_empty(), "{input:?}");
        }
    }

    #[test]
    fn complete_builds_addresses() {
        assert_eq!(suggester().complete("alex@gi"), vec!["alex@github.com"]);
        assert!(suggester().complete("alex").is_empty());
    }

    proptest! {
        #[test]
        fn suggestions_extend_the_typed_domain(user in "[a-z]{1,8}", domain in "[a-z.]{0,6}") {
            let input = format!("{user}@{domain}");
            for candidate in suggester().suggest(&input) {
                prop_assert!(candidate.starts_with(&domain));
                prop_assert!(domain.is_empty() || candidate != domain);
            }
        }
    }
}
