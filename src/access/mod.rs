//! # Access Control
//!
//! Capability-token authorization for boards. Every board carries an edit
//! secret and a public secret; presenting one of them is the only way to
//! prove access.
//!
//! Secrets travel in URLs, so transport confidentiality is assumed to come
//! from TLS in front of the server.

mod gate;
mod secret;
mod verifier;

pub use gate::{Access, AccessGate, AccessOutcome};
pub use secret::{BoardSecrets, Secret};
pub use verifier::{verify, Verdict};
