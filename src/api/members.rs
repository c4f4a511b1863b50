//! Project Member Accessors

use crate::error::ApiError;
use crate::models::{NewMember, ProjectMember, Role};

use super::{ApiClient, Transport};

pub async fn list_members<T: Transport>(api: &ApiClient<T>, project_id: u32) -> Result<Vec<ProjectMember>, ApiError> {
    api.get(&format!("/projects/{}/members/", project_id)).await
}

/// Admin only; the server rejects everyone else with 403
pub async fn add_member<T: Transport>(
    api: &ApiClient<T>,
    project_id: u32,
    email: &str,
    role: Role,
) -> Result<serde_json::Value, ApiError> {
    api.post(&format!("/projects/{}/members/", project_id), &NewMember { email, role }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;

    #[tokio::test]
    async fn test_list_members() {
        let (api, transport) = fake::client();
        transport.respond(
            200,
            r#"[{"id":1,"email":"lead@fixhub.io","role":"admin"},{"user_id":2,"role":"viewer"}]"#,
        );

        let members = list_members(&api, 3).await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].role, Role::Viewer);
        assert_eq!(transport.last_request().url, "http://api.test/projects/3/members/");
    }

    #[tokio::test]
    async fn test_add_member_forbidden_for_non_admin() {
        let (api, transport) = fake::client();
        transport.respond(403, r#"{"detail":"Only admins can add members"}"#);

        let err = add_member(&api, 3, "new@fixhub.io", Role::Developer).await.unwrap_err();
        assert!(err.is_forbidden());
        let body = transport.last_request().body.unwrap();
        assert_eq!(body["role"], "developer");
        assert_eq!(body["email"], "new@fixhub.io");
    }
}
