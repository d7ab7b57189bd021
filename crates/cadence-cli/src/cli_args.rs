use clap::Parser;

use cadence_slack::DEFAULT_SLACK_API_BASE;

const MAX_HISTORY_LIMIT: usize = 1_000;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_history_limit(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if !(1..=MAX_HISTORY_LIMIT).contains(&parsed) {
        return Err(format!("value must be in range 1..={MAX_HISTORY_LIMIT}"));
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "cadence",
    about = "Report how often each event keyword was posted to a Slack channel today",
    version
)]
/// Command-line arguments for the `cadence` binary.
pub struct Cli {
    #[arg(
        long = "slack-token",
        env = "SLACK_TOKEN",
        hide_env_values = true,
        help = "Slack token used for users.conversations and conversations.history"
    )]
    pub slack_token: Option<String>,

    #[arg(
        long = "channel-name",
        env = "CHANNEL_NAME",
        help = "Name of the channel to report on"
    )]
    pub channel_name: Option<String>,

    #[arg(
        long = "channel-id",
        env = "CHANNEL_ID",
        help = "Id of the channel to report on; either this or --channel-name is required"
    )]
    pub channel_id: Option<String>,

    #[arg(
        long = "slack-api-base",
        env = "CADENCE_SLACK_API_BASE",
        default_value = DEFAULT_SLACK_API_BASE,
        help = "Slack Web API base URL"
    )]
    pub slack_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "CADENCE_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each Slack API request in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "history-limit",
        env = "CADENCE_HISTORY_LIMIT",
        default_value_t = MAX_HISTORY_LIMIT,
        value_parser = parse_history_limit,
        help = "Maximum number of messages fetched from today's history (single page)"
    )]
    pub history_limit: usize,
}
