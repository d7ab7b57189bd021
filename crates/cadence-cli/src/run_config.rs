use cadence_core::ReportZone;
use cadence_slack::ChannelSelector;
use thiserror::Error;

use crate::cli_args::Cli;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Configuration problems detected before any Slack request is made.
pub enum ConfigError {
    #[error("SLACK_TOKEN is not set")]
    MissingToken,
    #[error("CHANNEL_NAME and CHANNEL_ID are not set")]
    MissingChannel,
}

#[derive(Debug, Clone)]
/// Validated settings for one report run.
pub struct RunConfig {
    pub slack_token: String,
    pub channel: ChannelSelector,
    pub slack_api_base: String,
    pub request_timeout_ms: u64,
    pub history_limit: usize,
    pub zone: ReportZone,
}

impl RunConfig {
    pub fn from_cli(cli: Cli, zone: ReportZone) -> Result<Self, ConfigError> {
        let slack_token = cli
            .slack_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let channel = ChannelSelector::new(cli.channel_name.as_deref(), cli.channel_id.as_deref());
        if channel.is_empty() {
            return Err(ConfigError::MissingChannel);
        }
        Ok(Self {
            slack_token,
            channel,
            slack_api_base: cli.slack_api_base,
            request_timeout_ms: cli.request_timeout_ms,
            history_limit: cli.history_limit,
            zone,
        })
    }
}
