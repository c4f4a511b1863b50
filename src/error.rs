//! API error taxonomy.
//!
//! Every accessor returns `ApiError`; screens turn it into an inline message
//! with `user_message`, falling back to their own generic text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-2xx response onto the taxonomy, pulling the FastAPI `detail`
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body).unwrap_or_default();
        match status {
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            400 | 422 => ApiError::Validation(detail),
            _ => ApiError::Server { status, detail },
        }
    }

    /// Server-provided detail text, if any
    pub fn detail(&self) -> Option<&str> {
        let detail = match self {
            ApiError::Unauthorized(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Validation(d)
            | ApiError::Server { detail: d, .. } => d,
            ApiError::Network(_) | ApiError::Decode(_) => return None,
        };
        if detail.is_empty() { None } else { Some(detail) }
    }

    /// Text shown to the user: the server's detail, else the screen's fallback
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Error line a screen shows after a (re)load; a success clears it
pub fn load_error<T>(result: &Result<T, ApiError>, fallback: &str) -> Option<String> {
    result.as_ref().err().map(|err| err.user_message(fallback))
}

/// `{"detail": "..."}` or the 422 form `{"detail": [{"msg": "..."}, ...]}`
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() { None } else { Some(msgs.join("; ")) }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_cleared_by_success() {
        let failed: Result<Vec<u32>, ApiError> = Err(ApiError::Network("offline".into()));
        assert_eq!(load_error(&failed, "Failed to load members"), Some("Failed to load members".to_string()));

        let forbidden: Result<Vec<u32>, ApiError> = Err(ApiError::from_status(403, r#"{"detail":"Admins only"}"#));
        assert_eq!(load_error(&forbidden, "Failed to load members"), Some("Admins only".to_string()));

        let reloaded: Result<Vec<u32>, ApiError> = Ok(vec![1, 2]);
        assert_eq!(load_error(&reloaded, "Failed to load members"), None);
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthorized(_)));
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Forbidden(_)));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound(_)));
        assert!(matches!(ApiError::from_status(400, ""), ApiError::Validation(_)));
        assert!(matches!(ApiError::from_status(422, ""), ApiError::Validation(_)));
        assert_eq!(
            ApiError::from_status(502, "bad gateway"),
            ApiError::Server { status: 502, detail: String::new() }
        );
    }

    #[test]
    fn test_detail_string() {
        let err = ApiError::from_status(400, r#"{"detail":"Invalid status transition: todo → done"}"#);
        assert_eq!(err.user_message("Update failed"), "Invalid status transition: todo → done");
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["body","title"],"msg":"field required"},{"msg":"value is not a valid email"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.detail(), Some("field required; value is not a valid email"));
    }

    #[test]
    fn test_fallback_when_no_detail() {
        assert_eq!(ApiError::from_status(500, "<html>").user_message("Failed to load"), "Failed to load");
        assert_eq!(ApiError::Network("offline".into()).user_message("Failed to load"), "Failed to load");
    }
}
