//! The closed set of portal roles.
//!
//! Roles are a closed enum and staff-ness is an explicit capability check,
//! never a string-prefix match. The string forms survive only at
//! serialization boundaries (JWT claims, the `profiles.role` column).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A portal role. Ordering of privilege: `Client` < `StaffDrafter` <
/// `StaffManager` < `StaffAdmin`, though authorization decisions go through
/// [`crate::policy`] rather than comparing variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    StaffDrafter,
    StaffManager,
    StaffAdmin,
}

impl Role {
    /// Every role a registered user can hold. Useful for admin UIs and tests.
    pub const ALL: [Role; 4] = [
        Role::Client,
        Role::StaffDrafter,
        Role::StaffManager,
        Role::StaffAdmin,
    ];

    /// The wire/database form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::StaffDrafter => "staff_drafter",
            Role::StaffManager => "staff_manager",
            Role::StaffAdmin => "staff_admin",
        }
    }

    /// Whether this role belongs to company staff (as opposed to a client).
    pub fn is_staff(self) -> bool {
        !matches!(self, Role::Client)
    }

    /// Whether this role can manage projects (create, reassign, edit any
    /// phase): managers and admins.
    pub fn is_manager(self) -> bool {
        matches!(self, Role::StaffManager | Role::StaffAdmin)
    }

    /// Whether this role holds full administrative rights.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::StaffAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "staff_drafter" => Ok(Role::StaffDrafter),
            "staff_manager" => Ok(Role::StaffManager),
            "staff_admin" => Ok(Role::StaffAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Returned when a stored or transmitted role string is not in the closed
/// set. Callers treat this as a deny (fail closed), never as a default role.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown role: {0:?}")]
pub struct UnknownRole(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn client_is_not_staff() {
        assert!(!Role::Client.is_staff());
    }

    #[test]
    fn every_staff_role_is_staff() {
        assert!(Role::StaffDrafter.is_staff());
        assert!(Role::StaffManager.is_staff());
        assert!(Role::StaffAdmin.is_staff());
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::StaffAdmin.is_admin());
        assert!(!Role::StaffManager.is_admin());
        assert!(!Role::StaffDrafter.is_admin());
        assert!(!Role::Client.is_admin());
    }

    #[test]
    fn drafter_is_not_manager() {
        assert!(Role::StaffManager.is_manager());
        assert!(Role::StaffAdmin.is_manager());
        assert!(!Role::StaffDrafter.is_manager());
    }

    #[test]
    fn unknown_role_string_is_rejected() {
        // A typo or tampered claim must never resolve to a role.
        assert!("staff".parse::<Role>().is_err());
        assert!("admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }
}
