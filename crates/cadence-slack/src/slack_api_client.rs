//! Slack Web API client for channel lookup and history reads.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use cadence_core::RawEvent;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::channel_selector::{ChannelSelector, SlackChannel};
use crate::history_window::HistoryWindow;
use crate::slack_helpers::{slack_error_label, truncate_for_error};

pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";

const CONVERSATION_TYPES: &str = "public_channel,private_channel";
const CONVERSATION_LIST_LIMIT: &str = "1000";

#[derive(Debug, Clone, Deserialize)]
struct SlackUserConversationsResponse {
    ok: bool,
    #[serde(default)]
    channels: Vec<SlackChannel>,
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SlackHistoryMessage {
    #[serde(default)]
    text: String,
    ts: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SlackConversationHistoryResponse {
    ok: bool,
    #[serde(default)]
    messages: Vec<SlackHistoryMessage>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct SlackApiClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl SlackApiClient {
    pub fn new(api_base: String, token: String, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("cadence"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create slack api client")?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    /// Conversations the token owner belongs to, single page.
    pub async fn list_user_conversations(&self) -> Result<Vec<SlackChannel>> {
        let response: SlackUserConversationsResponse = self
            .request_json(
                "users.conversations",
                self.http
                    .post(format!("{}/users.conversations", self.api_base))
                    .bearer_auth(&self.token)
                    .form(&[
                        ("types", CONVERSATION_TYPES),
                        ("limit", CONVERSATION_LIST_LIMIT),
                    ]),
            )
            .await?;
        if !response.ok {
            bail!(
                "slack users.conversations failed: {}",
                slack_error_label(response.error)
            );
        }
        debug!(count = response.channels.len(), "listed slack conversations");
        Ok(response.channels)
    }

    pub async fn resolve_channel(&self, selector: &ChannelSelector) -> Result<SlackChannel> {
        if selector.is_empty() {
            bail!("channel selector requires a channel name or id");
        }
        let channels = self.list_user_conversations().await?;
        let channel = selector
            .find(&channels)
            .cloned()
            .ok_or_else(|| anyhow!("can not find channel ({})", selector.describe()))?;
        info!(channel_id = %channel.id, channel_name = %channel.name, "resolved slack channel");
        Ok(channel)
    }

    /// One page of channel history inside `window`, as raw events.
    pub async fn conversation_history(
        &self,
        channel_id: &str,
        window: &HistoryWindow,
        limit: usize,
    ) -> Result<Vec<RawEvent>> {
        let limit = limit.max(1).to_string();
        let oldest = window.oldest_param();
        let latest = window.latest_param();
        let response: SlackConversationHistoryResponse = self
            .request_json(
                "conversations.history",
                self.http
                    .post(format!("{}/conversations.history", self.api_base))
                    .bearer_auth(&self.token)
                    .form(&[
                        ("channel", channel_id),
                        ("limit", limit.as_str()),
                        ("oldest", oldest.as_str()),
                        ("latest", latest.as_str()),
                    ]),
            )
            .await?;
        if !response.ok {
            bail!(
                "slack conversations.history failed: {}",
                slack_error_label(response.error)
            );
        }

        let received = response.messages.len();
        let events = response
            .messages
            .into_iter()
            .filter_map(|message| {
                message
                    .ts
                    .map(|timestamp| RawEvent::new(message.text, timestamp))
            })
            .collect::<Vec<_>>();
        info!(
            channel_id,
            received,
            kept = events.len(),
            "fetched slack channel history"
        );
        Ok(events)
    }

    async fn request_json<T>(&self, operation: &str, request: reqwest::RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .with_context(|| format!("slack api {operation} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "slack api {operation} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode slack {operation}"))
    }
}
