//! Authorization policy: pure, side-effect-free predicates.
//!
//! Every predicate takes the acting user explicitly; there is no ambient
//! identity. Callers check the predicate before attempting a mutation, and
//! the API layer translates a `false` into 403. A request whose role claim
//! failed to parse never reaches these functions (the extractor rejects it),
//! so absence-of-role is a deny by construction.

use crate::roles::Role;
use crate::types::DbId;

/// The acting user, resolved from an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }
}

/// The assignment fields of a project that authorization reads. Kept apart
/// from the storage model so the policy stays free of database types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStakeholders {
    /// The client who owns the project, once assigned.
    pub client_id: Option<DbId>,
    /// Staff member the project as a whole is assigned to.
    pub assigned_staff_id: Option<DbId>,
    pub project_manager_id: Option<DbId>,
    pub lead_drafter_id: Option<DbId>,
}

/// Staff can see every project; a client sees only their own.
pub fn can_view_project(actor: Actor, project: &ProjectStakeholders) -> bool {
    actor.role.is_staff() || project.client_id == Some(actor.id)
}

/// Admins and managers edit any phase; the project's PM and lead drafter
/// edit any phase of their project; other staff only phases assigned to
/// them. Clients never edit phases.
pub fn can_edit_phase(
    actor: Actor,
    project: &ProjectStakeholders,
    phase_assignee: Option<DbId>,
) -> bool {
    if !actor.role.is_staff() {
        return false;
    }
    actor.role.is_manager()
        || project.project_manager_id == Some(actor.id)
        || project.lead_drafter_id == Some(actor.id)
        || phase_assignee == Some(actor.id)
}

/// Only admins and managers create projects.
pub fn can_create_project(actor: Actor) -> bool {
    actor.role.is_manager()
}

/// Deleting a project is irreversible and admin-only.
pub fn can_delete_project(actor: Actor) -> bool {
    actor.role.is_admin()
}

/// Admin/manager, the drafter assigned to the project, or its PM/lead
/// drafter may upload files.
pub fn can_upload_file(actor: Actor, project: &ProjectStakeholders) -> bool {
    if !actor.role.is_staff() {
        return false;
    }
    actor.role.is_manager()
        || (actor.role == Role::StaffDrafter && project.assigned_staff_id == Some(actor.id))
        || project.project_manager_id == Some(actor.id)
        || project.lead_drafter_id == Some(actor.id)
}

/// Admin/manager, or the user who uploaded the file.
pub fn can_delete_file(actor: Actor, uploaded_by: DbId) -> bool {
    if !actor.role.is_staff() {
        return false;
    }
    actor.role.is_manager() || uploaded_by == actor.id
}
