//! # Capability Secrets
//!
//! 128-bit unguessable tokens that grant access to a board by themselves.
//!
//! ## Invariants
//! - Secrets are generated once from the OS random source and never change
//! - A board's edit and public secrets are always distinct
//! - Comparison is exact-match over all 16 bytes, in constant time

use std::fmt;

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// An opaque capability token.
///
/// Rendered as a hyphenated UUID so it can travel in URLs. `Debug` never
/// prints the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(Uuid);

impl Secret {
    /// Generate a fresh secret from the OS random source
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Parse a presented secret. Anything that is not a UUID yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }

    /// Raw secret bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Constant-time equality over all 16 bytes
    pub fn ct_eq(&self, other: &Secret) -> bool {
        self.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl From<Uuid> for Secret {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// The pair of secrets stored with every board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSecrets {
    /// Grants read and write access
    pub edit: Secret,
    /// Grants read access only
    pub public: Secret,
}

impl BoardSecrets {
    /// Generate a distinct edit/public pair
    pub fn generate() -> Self {
        let edit = Secret::generate();
        let mut public = Secret::generate();
        while public.ct_eq(&edit) {
            public = Secret::generate();
        }
        Self { edit, public }
    }
}
