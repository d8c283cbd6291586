//! Repository for the `profiles` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, ProfileInfo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, full_name, role, password_hash, is_active, created_at, updated_at";

/// Columns safe to expose in API responses.
const INFO_COLUMNS: &str = "id, email, full_name, role";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (email, full_name, role, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List active profiles with the given role, ordered by name.
    pub async fn list_by_role(pool: &PgPool, role: &str) -> Result<Vec<ProfileInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {INFO_COLUMNS} FROM profiles
             WHERE role = $1 AND is_active
             ORDER BY full_name"
        );
        sqlx::query_as::<_, ProfileInfo>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// List all active staff profiles (any `staff_*` role), ordered by name.
    pub async fn list_staff(pool: &PgPool) -> Result<Vec<ProfileInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {INFO_COLUMNS} FROM profiles
             WHERE role IN ('staff_drafter', 'staff_manager', 'staff_admin') AND is_active
             ORDER BY full_name"
        );
        sqlx::query_as::<_, ProfileInfo>(&query).fetch_all(pool).await
    }

    /// Change a profile's role. Returns the updated row, or `None` if the
    /// profile does not exist.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET role = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}
