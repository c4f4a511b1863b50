//! Project Scope
//!
//! The caller's role in the project being viewed. Loaded once when a project
//! route is entered and then handed to each page as an explicit prop.

use crate::api::{projects, ApiClient, Transport};
use crate::error::ApiError;
use crate::models::Role;

pub const ACCESS_DENIED_MESSAGE: &str = "You do not have access to this project";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectScope {
    pub project_id: u32,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeLoad {
    Loading,
    Ready(ProjectScope),
    /// 403: not a member; no scope is published
    Denied,
    Failed(String),
}

impl ScopeLoad {
    pub fn from_result(project_id: u32, result: Result<Role, ApiError>) -> Self {
        match result {
            Ok(role) => ScopeLoad::Ready(ProjectScope { project_id, role }),
            Err(err) if err.is_forbidden() => ScopeLoad::Denied,
            Err(err) => {
                log::warn!("[SCOPE] role load for project {} failed: {}", project_id, err);
                ScopeLoad::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }
}

/// One `my-role` request per project visit
pub async fn load_scope<T: Transport>(api: &ApiClient<T>, project_id: u32) -> ScopeLoad {
    ScopeLoad::from_result(project_id, projects::my_role(api, project_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;

    #[tokio::test]
    async fn test_ready_with_role() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"role":"admin"}"#);

        let load = load_scope(&api, 4).await;
        assert_eq!(load, ScopeLoad::Ready(ProjectScope { project_id: 4, role: Role::Admin }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_forbidden_is_denied() {
        let (api, transport) = fake::client();
        transport.respond(403, r#"{"detail":"Not a project member"}"#);

        assert_eq!(load_scope(&api, 4).await, ScopeLoad::Denied);
    }

    #[tokio::test]
    async fn test_other_failures() {
        let (api, transport) = fake::client();
        transport.respond(500, "");

        assert_eq!(load_scope(&api, 4).await, ScopeLoad::Failed(LOAD_FAILED_MESSAGE.to_string()));
    }
}
