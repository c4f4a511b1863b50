//! Comment Accessors

use crate::error::ApiError;
use crate::models::{Comment, MessageResponse, NewComment};

use super::{ApiClient, Transport};

pub async fn list_comments<T: Transport>(api: &ApiClient<T>, ticket_id: u32) -> Result<Vec<Comment>, ApiError> {
    api.get(&format!("/comments/ticket/{}", ticket_id)).await
}

pub async fn add_comment<T: Transport>(api: &ApiClient<T>, ticket_id: u32, content: &str) -> Result<Comment, ApiError> {
    api.post("/comments/", &NewComment { content, ticket_id }).await
}

/// Author or project owner only; decided by the server
pub async fn delete_comment<T: Transport>(api: &ApiClient<T>, comment_id: u32) -> Result<MessageResponse, ApiError> {
    api.delete(&format!("/comments/{}", comment_id)).await
}
