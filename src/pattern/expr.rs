use std::sync::LazyLock;

use regex::Regex;

use super::EmailPattern;

// https://www.regular-expressions.info/email.html
const RFC1035: &str = r##"(?i)\A(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])\z"##;

const PRACTICAL: &str = r##"(?i)\A[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\z"##;

static RFC1035_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(RFC1035).ok());
static PRACTICAL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(PRACTICAL).ok());

const MIN_TOTAL: usize = 6;
const MAX_TOTAL: usize = 254;
const MAX_LOCAL: usize = 64;
const MAX_LABEL: usize = 63;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternFlavor {
    /// dot-atom ou quoted-string, hôte ou littéral IP entre crochets
    #[default]
    Rfc1035,
    /// dot-atom uniquement, avec les limites de longueur RFC 5321
    Practical,
}

/// Stratégie par expression régulière.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexPattern {
    flavor: PatternFlavor,
}

impl RegexPattern {
    pub fn new(flavor: PatternFlavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> PatternFlavor {
        self.flavor
    }

    fn regex(&self) -> Option<&'static Regex> {
        match self.flavor {
            PatternFlavor::Rfc1035 => RFC1035_RE.as_ref(),
            PatternFlavor::Practical => PRACTICAL_RE.as_ref(),
        }
    }
}

impl EmailPattern for RegexPattern {
    fn is_valid(&self, email: &str) -> bool {
        // `(?i)` unicode : `[a-z]` couvrirait aussi U+017F et U+212A
        if !email.is_ascii() {
            return false;
        }
        let Some(re) = self.regex() else {
            return false;
        };
        if !re.is_match(email) {
            return false;
        }
        match self.flavor {
            PatternFlavor::Rfc1035 => true,
            PatternFlavor::Practical => within_limits(email),
        }
    }
}

/// Longueurs : total 6..=254, local 1..=64, labels 1..=63.
fn within_limits(email: &str) -> bool {
    if !(MIN_TOTAL..=MAX_TOTAL).contains(&email.len()) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL {
        return false;
    }
    domain
        .split('.')
        .all(|label| !label.is_empty() && label.len() <= MAX_LABEL)
}
