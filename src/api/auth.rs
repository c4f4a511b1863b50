//! Auth Accessors
//!
//! Login and registration are the only calls made without a credential.

use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, MessageResponse};

use super::{ApiClient, Transport};

/// Exchange credentials for a bearer token and start the session
pub async fn login<T: Transport>(api: &ApiClient<T>, email: &str, password: &str) -> Result<(), ApiError> {
    let response: LoginResponse = api
        .post_public("/auth/login", &Credentials { email, password })
        .await?;
    api.session().login(&response.access_token)
}

pub async fn register<T: Transport>(api: &ApiClient<T>, email: &str, password: &str) -> Result<MessageResponse, ApiError> {
    api.post_public("/auth/register", &Credentials { email, password }).await
}

pub fn logout<T: Transport>(api: &ApiClient<T>) {
    api.session().logout();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake;

    #[tokio::test]
    async fn test_login_success_authenticates() {
        let (api, transport) = fake::anonymous_client();
        transport.respond(200, r#"{"access_token":"jwt.abc","token_type":"bearer"}"#);

        login(&api, "dev@fixhub.io", "secret").await.unwrap();

        assert!(api.session().is_authenticated());
        assert_eq!(api.session().token().as_deref(), Some("jwt.abc"));
        let request = transport.last_request();
        assert_eq!(request.url, "http://api.test/auth/login");
        assert_eq!(request.body.unwrap()["email"], "dev@fixhub.io");
    }

    #[tokio::test]
    async fn test_login_bad_credentials_stays_anonymous() {
        let (api, transport) = fake::anonymous_client();
        transport.respond(401, r#"{"detail":"Invalid credentials"}"#);

        let err = login(&api, "dev@fixhub.io", "wrong").await.unwrap_err();

        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_empty_token_is_rejected() {
        let (api, transport) = fake::anonymous_client();
        transport.respond(200, r#"{"access_token":""}"#);

        assert!(login(&api, "a@b.c", "pw").await.is_err());
        assert!(!api.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_duplicate_user() {
        let (api, transport) = fake::anonymous_client();
        transport.respond(400, r#"{"detail":"User already exists"}"#);

        let err = register(&api, "a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref d) if d == "User already exists"));
    }

    #[test]
    fn test_logout() {
        let (api, _) = fake::client();
        logout(&api);
        assert!(!api.session().is_authenticated());
    }
}
