//! Profile entity model and DTOs.

use jupiter_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileInfo`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    /// One of the closed role set; parse with `jupiter_core::roles::Role`.
    pub role: String,
    /// `None` until the user completes account setup (e.g. a client profile
    /// created by staff during project intake). Login is refused while unset.
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<Profile> for ProfileInfo {
    fn from(profile: Profile) -> Self {
        ProfileInfo {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
        }
    }
}

/// DTO for creating a new profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub password_hash: Option<String>,
}
