//! # Token Verifier
//!
//! Pure mapping from a claimed secret and a board's stored secrets to a
//! verdict. No lookups, no state.

use super::secret::{BoardSecrets, Secret};

/// What a claimed secret proves about a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Claimed value is the edit secret
    Edit,
    /// Claimed value is the public secret
    Read,
    /// Claimed value matches neither secret
    Mismatch,
    /// There is no board to check against
    Absent,
}

/// Verify a claimed secret against a board's stored pair.
///
/// A claimed value that does not parse as a secret can never match.
/// Both comparisons always run so the cost does not depend on which
/// secret matched.
pub fn verify(claimed: &str, stored: Option<&BoardSecrets>) -> Verdict {
    let Some(stored) = stored else {
        return Verdict::Absent;
    };
    let Some(claimed) = Secret::parse(claimed) else {
        return Verdict::Mismatch;
    };

    let is_edit = claimed.ct_eq(&stored.edit);
    let is_public = claimed.ct_eq(&stored.public);

    if is_edit {
        Verdict::Edit
    } else if is_public {
        Verdict::Read
    } else {
        Verdict::Mismatch
    }
}
