//! Role-derived UI gates.
//!
//! These only decide what is *shown*. Every mutating call is re-checked by
//! the server, which rejects with 403 regardless of what the client rendered.

use crate::models::Role;

/// What the caller may attempt on one ticket, recomputed on every render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketPermissions {
    pub can_edit: bool,
    pub can_reassign: bool,
    pub can_archive: bool,
}

impl TicketPermissions {
    /// Developers may edit any ticket that has *an* assignee, not only their
    /// own. The backend answers 403 for the rest.
    pub fn derive(role: Role, assigned_to: Option<u32>) -> Self {
        Self {
            can_edit: role == Role::Admin || (role == Role::Developer && assigned_to.is_some()),
            can_reassign: role == Role::Admin,
            can_archive: role == Role::Admin,
        }
    }
}

/// Drag cards between Kanban columns
pub fn can_drag(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Developer)
}

pub fn can_create_ticket(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Developer)
}

pub fn can_manage_members(role: Role) -> bool {
    role == Role::Admin
}
