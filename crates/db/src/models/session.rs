//! Refresh-token session model.

use jupiter_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row. `refresh_token_hash` is the SHA-256 hex digest of the
/// opaque token; the plaintext is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub profile_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Insert payload for a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub profile_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
