//! Slack Web API access for cadence.
//!
//! Resolves the target channel among the token owner's conversations and
//! fetches one page of message history for the current local day, handing
//! the messages to the core as raw events.

mod channel_selector;
mod history_window;
mod slack_api_client;
mod slack_helpers;

pub use channel_selector::{ChannelSelector, SlackChannel};
pub use history_window::HistoryWindow;
pub use slack_api_client::{SlackApiClient, DEFAULT_SLACK_API_BASE};
