//! Validation syntaxique des adresses.
//!
//! Deux stratégies interchangeables implémentent [`EmailPattern`] :
//! [`RegexPattern`] (expression régulière) et [`UriPattern`] (décomposition
//! de l'adresse comme une URI `email://user@host`).

mod expr;
mod uri;

pub use expr::{PatternFlavor, RegexPattern};
pub use uri::UriPattern;

/// Ponctuation refusée à la saisie, en plus des espaces et retours à la ligne.
pub const ILLEGAL_PUNCTUATION: [char; 2] = [':', '/'];

/// `true` pour un caractère qui ne peut jamais apparaître dans une adresse
/// acceptée (filtrage touche par touche).
pub fn is_illegal_character(c: char) -> bool {
    c.is_whitespace() || ILLEGAL_PUNCTUATION.contains(&c)
}

pub trait EmailPattern: Send + Sync {
    /// Validation complète de l'adresse.
    fn is_valid(&self, email: &str) -> bool;

    fn is_illegal(&self, c: char) -> bool {
        is_illegal_character(c)
    }

    /// `true` si `input` ne contient aucun caractère illégal.
    /// Indépendant de [`is_valid`](Self::is_valid) : sert au filtrage incrémental.
    fn legal_character(&self, input: &str) -> bool {
        !input.chars().any(|c| self.is_illegal(c))
    }
}

impl<T: EmailPattern + ?Sized> EmailPattern for Box<T> {
    fn is_valid(&self, email: &str) -> bool {
        (**self).is_valid(email)
    }

    fn is_illegal(&self, c: char) -> bool {
        (**self).is_illegal(c)
    }
}
