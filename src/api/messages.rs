//! Chat history.

use super::{parse_field, ApiClient, ApiError};
use crate::domain::Message;
use serde_json::Value;

/// Pull the message list out of an envelope payload and sort it ascending
/// by date for rendering. Only history is sorted; live frames are appended
/// at the tail in arrival order by the chat transport.
pub fn parse_message_history(payload: &Value) -> Result<Vec<Message>, ApiError> {
    let mut messages: Vec<Message> = parse_field(payload, "messages")?;
    messages.sort_by_key(|m| m.date);
    Ok(messages)
}

impl ApiClient {
    /// Last-N message history for an order.
    pub async fn message_list(&self, order_id: i64) -> Result<Vec<Message>, ApiError> {
        let payload = self
            .get("/messages/list", &[("order_id", order_id.to_string())])
            .await?;
        parse_message_history(&payload)
    }
}
