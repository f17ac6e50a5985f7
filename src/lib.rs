#![forbid(unsafe_code)]
//! mailvalid_lib — validation format, autocomplétion et délivrabilité e-mail
//!
//! Les événements `tracing` (cache, vérificateurs, validateur) sont toujours
//! émis ; sans subscriber installé par l'application, ils sont ignorés.

pub mod address;
pub mod cache;
pub mod deliver;
pub mod pattern;
pub mod suggest;
pub mod validator;

pub use address::user_and_domain;
pub use cache::{CacheOptions, CachedDeliver};
pub use deliver::{DeliverError, Deliverable, Delivery};
pub use pattern::{EmailPattern, PatternFlavor, RegexPattern, UriPattern};
pub use suggest::{DEFAULT_PRESET, EmailSuggest, PresetSuggester};
pub use validator::{EmailValidator, ValidationResult};

#[cfg(feature = "with-api")]
pub use deliver::{ApiDeliver, ApiDeliverOptions};
#[cfg(feature = "with-dns")]
pub use deliver::HostLiveness;
