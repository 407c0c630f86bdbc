use serde::Deserialize;

use crate::error::DeliveryError;

/// The chat side of the bot. Thread creation and message delivery are the
/// only two calls the core makes; everything else about the chat platform
/// stays behind this trait.
pub trait MessageSink {
    /// Posts a top-level message and returns the identifier under which
    /// replies can be threaded.
    fn create_thread(&self, text: &str) -> Result<String, DeliveryError>;
    fn post_message(&self, thread_id: &str, text: &str) -> Result<(), DeliveryError>;
}

/// Slack binding: both calls are `chat.postMessage`, with and without
/// `thread_ts`. The `ts` of the root message doubles as the thread id.
pub struct SlackSink {
    client: reqwest::blocking::Client,
    api_base: String,
    token: String,
    channel: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

impl SlackSink {
    pub fn new(api_base: &str, token: &str, channel: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: crate::http::http_client()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            channel: channel.to_string(),
        })
    }

    fn post(&self, body: &serde_json::Value) -> Result<ApiResponse, DeliveryError> {
        let response: ApiResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.api_base))
            .bearer_auth(&self.token)
            .json(body)
            .send()?
            .error_for_status()?
            .json()?;

        if !response.ok {
            return Err(DeliveryError::Api(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(response)
    }
}

impl MessageSink for SlackSink {
    fn create_thread(&self, text: &str) -> Result<String, DeliveryError> {
        let response = self.post(&serde_json::json!({
            "channel": self.channel,
            "text": text,
        }))?;
        response.ts.ok_or(DeliveryError::MalformedResponse("ts"))
    }

    fn post_message(&self, thread_id: &str, text: &str) -> Result<(), DeliveryError> {
        self.post(&serde_json::json!({
            "channel": self.channel,
            "thread_ts": thread_id,
            "text": text,
        }))?;
        Ok(())
    }
}
