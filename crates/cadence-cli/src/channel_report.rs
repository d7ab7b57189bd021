//! Fetch-aggregate-report pipeline for one channel.

use std::io::Write;

use anyhow::{Context, Result};
use cadence_core::{aggregate, write_report, RawEvent};
use cadence_slack::{HistoryWindow, SlackApiClient};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::run_config::RunConfig;

/// Resolves the configured channel and fetches today's messages up to `now`.
pub async fn fetch_channel_events(config: &RunConfig, now: DateTime<Utc>) -> Result<Vec<RawEvent>> {
    let client = SlackApiClient::new(
        config.slack_api_base.clone(),
        config.slack_token.clone(),
        config.request_timeout_ms,
    )?;
    let channel = client.resolve_channel(&config.channel).await?;
    let window = HistoryWindow::today_until(now, &config.zone);
    client
        .conversation_history(&channel.id, &window, config.history_limit)
        .await
        .context("can not get messages response")
}

/// Runs the whole report for `now`, writing it to `out`.
///
/// A failed fetch returns before anything is aggregated or written.
pub async fn run_report<W: Write>(config: &RunConfig, now: DateTime<Utc>, out: &mut W) -> Result<()> {
    let events = fetch_channel_events(config, now).await?;
    let result = aggregate(&events);
    info!(
        messages = events.len(),
        keys = result.len(),
        "rendering channel report"
    );
    write_report(&result, &config.zone, out).context("failed to write report")
}

#[cfg(test)]
mod tests {
    use cadence_core::ReportZone;
    use cadence_slack::ChannelSelector;
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use serde_json::json;

    use super::run_report;
    use crate::run_config::RunConfig;

    fn test_config(base_url: &str) -> RunConfig {
        RunConfig {
            slack_token: "xoxb-test".to_string(),
            channel: ChannelSelector::new(None, Some("C1")),
            slack_api_base: base_url.to_string(),
            request_timeout_ms: 2_000,
            history_limit: 1_000,
            zone: ReportZone::from_iana("Asia/Tokyo").expect("zone"),
        }
    }

    #[tokio::test]
    async fn functional_run_report_writes_rendered_series() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users.conversations");
            then.status(200).json_body(json!({
                "ok": true,
                "channels": [{ "id": "C1", "name": "events" }]
            }));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/conversations.history")
                .body_includes("channel=C1");
            then.status(200).json_body(json!({
                "ok": true,
                "messages": [
                    { "text": "test", "ts": "1512085960.000000" },
                    { "text": "test", "ts": "1512085950.000000" }
                ]
            }));
        });

        let now = Utc.timestamp_opt(1_512_086_000, 0).unwrap();
        let mut out = Vec::new();
        run_report(&test_config(&server.base_url()), now, &mut out)
            .await
            .expect("report");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Result:\ntest : 2 times\n1 : 2017-12-01 08:52:30 +0900 JST : 0s\n2 : 2017-12-01 08:52:40 +0900 JST : 10s\naverage: 10 s\n"
        );
    }

    #[tokio::test]
    async fn regression_run_report_writes_nothing_when_fetch_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users.conversations");
            then.status(200).json_body(json!({
                "ok": true,
                "channels": [{ "id": "C1", "name": "events" }]
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/conversations.history");
            then.status(500).body("upstream down");
        });

        let now = Utc.timestamp_opt(1_512_086_000, 0).unwrap();
        let mut out = Vec::new();
        let error = run_report(&test_config(&server.base_url()), now, &mut out)
            .await
            .expect_err("fetch failure");
        assert!(format!("{error:#}").contains("can not get messages response"));
        assert!(out.is_empty());
    }
}
