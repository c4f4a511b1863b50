//! Attachment Accessor (read-only)

use crate::error::ApiError;
use crate::models::Attachment;

use super::{ApiClient, Transport};

pub async fn list_attachments<T: Transport>(api: &ApiClient<T>, ticket_id: u32) -> Result<Vec<Attachment>, ApiError> {
    api.get(&format!("/attachments/ticket/{}", ticket_id)).await
}
