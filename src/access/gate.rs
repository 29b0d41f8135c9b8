//! # Access Gate
//!
//! Combines the existence check with the token verifier.
//!
//! ## Invariants
//! - Edit access is never granted without a presented secret
//! - Existence is checked before any secret comparison, so a wrong secret
//!   for a missing board reports `NotFound`, never `Unauthorized`
//! - The public secret never grants edit access

use super::secret::BoardSecrets;
use super::verifier::{verify, Verdict};

/// Capability an operation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Mutations: edit secret only
    Edit,
    /// Reads that need a secret: edit or public
    Read,
    /// Reads open to anonymous callers; a presented secret must still be valid
    PublicRead,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Edit => "edit",
            Access::Read => "read",
            Access::PublicRead => "public_read",
        }
    }
}

/// Decision produced by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    EditAuthorized,
    ReadAuthorized,
    Unauthorized,
    NotFound,
}

impl AccessOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AccessOutcome::EditAuthorized | AccessOutcome::ReadAuthorized)
    }

    /// HTTP status the presentation layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AccessOutcome::EditAuthorized | AccessOutcome::ReadAuthorized => 200,
            AccessOutcome::Unauthorized => 401,
            AccessOutcome::NotFound => 404,
        }
    }
}

/// Stateless access gate. Constructed once and shared by the services.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    pub fn new() -> Self {
        Self
    }

    /// Decide access to a board.
    ///
    /// `board` is `None` when the board does not exist. An empty presented
    /// value counts as no secret.
    pub fn authorize(
        &self,
        access: Access,
        presented: Option<&str>,
        board: Option<&BoardSecrets>,
    ) -> AccessOutcome {
        let presented = presented.filter(|value| !value.trim().is_empty());

        match access {
            Access::Edit => {
                let Some(claimed) = presented else {
                    return AccessOutcome::Unauthorized;
                };
                match verify(claimed, board) {
                    Verdict::Absent => AccessOutcome::NotFound,
                    Verdict::Edit => AccessOutcome::EditAuthorized,
                    Verdict::Read | Verdict::Mismatch => AccessOutcome::Unauthorized,
                }
            }
            Access::Read | Access::PublicRead => {
                if board.is_none() {
                    return AccessOutcome::NotFound;
                }
                let Some(claimed) = presented else {
                    return if access == Access::PublicRead {
                        AccessOutcome::ReadAuthorized
                    } else {
                        AccessOutcome::Unauthorized
                    };
                };
                match verify(claimed, board) {
                    Verdict::Absent => AccessOutcome::NotFound,
                    Verdict::Edit | Verdict::Read => AccessOutcome::ReadAuthorized,
                    Verdict::Mismatch => AccessOutcome::Unauthorized,
                }
            }
        }
    }
}
