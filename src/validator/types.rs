#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Domaines suggérés ; toujours vide si `valid`.
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            suggestions: Vec::new(),
        }
    }

    pub fn invalid(suggestions: Vec<String>) -> Self {
        Self {
            valid: false,
            suggestions,
        }
    }
}
