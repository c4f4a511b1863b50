//! FixHub REST API
//!
//! `ApiClient` attaches the session credential to every call except
//! login/register and maps non-2xx responses onto `ApiError`. A 401 on an
//! authenticated call expires the session here, in one place, so no screen
//! has to handle it. Resource accessors live in the submodules, one per
//! backend resource.

mod transport;

pub mod attachments;
pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod kanban;
pub mod members;
pub mod projects;
pub mod tickets;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::Session;

pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

/// Whether a call carries the bearer credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

#[derive(Clone)]
pub struct ApiClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    session: Session,
}

impl ApiClient<HttpTransport> {
    pub fn new(config: &AppConfig, session: Session) -> Self {
        Self::with_transport(HttpTransport::default(), &config.api_base_url, session)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, base_url: &str, session: Session) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let body = self.send(Method::Get, path, None, Auth::Bearer).await?;
        decode(&body)
    }

    pub(crate) async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<R, ApiError> {
        let body = self.send(Method::Post, path, Some(encode(payload)?), Auth::Bearer).await?;
        decode(&body)
    }

    pub(crate) async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<R, ApiError> {
        let body = self.send(Method::Put, path, Some(encode(payload)?), Auth::Bearer).await?;
        decode(&body)
    }

    pub(crate) async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let body = self.send(Method::Delete, path, None, Auth::Bearer).await?;
        decode(&body)
    }

    /// POST without credential (login, register)
    pub(crate) async fn post_public<B: Serialize, R: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<R, ApiError> {
        let body = self.send(Method::Post, path, Some(encode(payload)?), Auth::Public).await?;
        decode(&body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        auth: Auth,
    ) -> Result<String, ApiError> {
        let bearer = match auth {
            Auth::Bearer => self.session.token(),
            Auth::Public => None,
        };
        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer,
            body,
        };
        log::debug!("[API] {} {}", method.as_str(), path);

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("[API] {} {} failed: {}", method.as_str(), path, e);
            e
        })?;
        if response.is_success() {
            return Ok(response.body);
        }

        let err = ApiError::from_status(response.status, &response.body);
        log::warn!("[API] {} {} -> {}: {}", method.as_str(), path, response.status, err);
        if auth == Auth::Bearer && err.is_unauthorized() {
            self.session.expire();
        }
        Err(err)
    }
}

fn encode<B: Serialize>(payload: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    // Some endpoints answer 200 with an empty body
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// `?k=v&...` with values percent-encoded; empty when there are no pairs
pub(crate) fn query_string(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC)))
        .collect();
    format!("?{}", joined.join("&"))
}
