//! Initial-message relay boundary.
//!
//! After a workspace is provisioned the user's first message (if any) is
//! handed to the builder model. Relay internals live behind the trait; the
//! production implementation forwards through [`ModelClient`] with the dev
//! server's MCP endpoint in the system line.

use async_trait::async_trait;
use tracing::info;

use crate::error::AppdockError;
use crate::model::{ChatMessage, ModelClient};

#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn send_initial_message(
        &self,
        app_id: &str,
        mcp_ephemeral_url: &str,
        text: &str,
    ) -> Result<(), AppdockError>;
}

/// Relays the first message to the builder model endpoint.
pub struct ModelChatRelay {
    model: ModelClient,
}

impl ModelChatRelay {
    pub fn new(model: ModelClient) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ChatRelay for ModelChatRelay {
    async fn send_initial_message(
        &self,
        app_id: &str,
        mcp_ephemeral_url: &str,
        text: &str,
    ) -> Result<(), AppdockError> {
        let messages = [
            ChatMessage::system(format!(
                "You are building app {app_id}. Dev server MCP endpoint: {mcp_ephemeral_url}"
            )),
            ChatMessage::user(text),
        ];

        let reply = self.model.chat(&messages).await?;
        info!(
            app_id,
            model = self.model.model(),
            reply_chars = reply.len(),
            "initial message relayed"
        );
        Ok(())
    }
}
