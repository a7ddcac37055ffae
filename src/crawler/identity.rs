//! Client identity pool
//!
//! One identity (User-Agent string) is drawn per session. The pool is
//! constructed explicitly so callers and tests can pin the choice.

use crate::ConfigError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Realistic desktop browser identities used when no pool is configured
pub const DEFAULT_IDENTITIES: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// A non-empty set of identities to choose from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPool {
    identities: Vec<String>,
}

impl IdentityPool {
    /// Creates a pool from the given identities
    ///
    /// Blank entries are discarded; an empty result is a configuration error.
    pub fn new(identities: Vec<String>) -> Result<Self, ConfigError> {
        let identities: Vec<String> = identities
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if identities.is_empty() {
            return Err(ConfigError::Validation(
                "identity pool must contain at least one non-blank entry".to_string(),
            ));
        }

        Ok(Self { identities })
    }

    /// A pool that always yields the same identity
    pub fn fixed(identity: impl Into<String>) -> Self {
        Self {
            identities: vec![identity.into()],
        }
    }

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    /// Picks an identity using the supplied RNG
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.identities
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_IDENTITIES[0])
    }

    /// Picks an identity using the thread-local RNG
    pub fn pick_random(&self) -> &str {
        self.pick(&mut rand::thread_rng())
    }
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self {
            identities: DEFAULT_IDENTITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
