//! Admin session plumbing.
//!
//! The admin gate is a single boolean flag held in server-side session state
//! tied to a signed session-id cookie. No per-admin identity, no expiry
//! beyond the session cookie's lifetime.

use sha2::{Digest, Sha256};
use tower_sessions::cookie::Key;

/// Session key under which the admin flag is stored.
pub const ADMIN_SESSION_FLAG: &str = "is_admin";

/// Stretch the configured secret into the 64 bytes of key material the
/// cookie signing layer requires.
pub fn signing_key(secret: &str) -> Key {
    let mut material = [0u8; 64];

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"cookoff.session.signing");
    material[..32].copy_from_slice(&hasher.finalize());

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"cookoff.session.verification");
    material[32..].copy_from_slice(&hasher.finalize());

    Key::from(&material)
}
