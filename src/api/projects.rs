//! Project Accessors

use crate::error::ApiError;
use crate::models::{NewProject, Project, Role, RoleResponse};

use super::{ApiClient, Transport};

pub async fn list_projects<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Project>, ApiError> {
    api.get("/projects/").await
}

pub async fn create_project<T: Transport>(
    api: &ApiClient<T>,
    name: &str,
    description: Option<&str>,
) -> Result<Project, ApiError> {
    api.post("/projects/", &NewProject { name, description }).await
}

/// Caller's role in one project; 403 when not a member
pub async fn my_role<T: Transport>(api: &ApiClient<T>, project_id: u32) -> Result<Role, ApiError> {
    let response: RoleResponse = api.get(&format!("/projects/{}/my-role", project_id)).await?;
    Ok(response.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fake, Method};

    #[tokio::test]
    async fn test_create_project_payload() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"id":12,"name":"Mobile","description":"iOS app"}"#);

        let project = create_project(&api, "Mobile", Some("iOS app")).await.unwrap();
        assert_eq!(project.id, 12);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://api.test/projects/");
        let body = request.body.unwrap();
        assert_eq!(body["name"], "Mobile");
        assert_eq!(body["description"], "iOS app");
    }

    #[tokio::test]
    async fn test_my_role() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"role":"developer"}"#);

        assert_eq!(my_role(&api, 5).await.unwrap(), Role::Developer);
        assert_eq!(transport.last_request().url, "http://api.test/projects/5/my-role");
    }

    #[tokio::test]
    async fn test_unknown_role_is_decode_error() {
        let (api, transport) = fake::client();
        transport.respond(200, r#"{"role":"owner"}"#);

        assert!(matches!(my_role(&api, 5).await, Err(ApiError::Decode(_))));
    }
}
