//! Groups raw message events into per-key occurrence series.

use std::{collections::HashMap, sync::OnceLock, time::Duration};

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, trace};

use crate::timestamp::parse_slack_timestamp;

const EVENT_KEY_PATTERN: &str = r"^[a-z0-9_-]+$";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message as delivered by the history source.
pub struct RawEvent {
    pub text: String,
    pub timestamp: String,
}

impl RawEvent {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One timestamped instance of an event key.
pub struct Occurrence {
    pub instant: DateTime<Utc>,
    pub gap_from_previous: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered occurrence history for a single event key.
///
/// Always holds at least one occurrence. Occurrences are in non-decreasing
/// instant order and `total_gap` is the sum of every `gap_from_previous`.
pub struct EventSeries {
    key: String,
    occurrences: Vec<Occurrence>,
    total_gap: Duration,
}

impl EventSeries {
    fn start(key: &str, instant: DateTime<Utc>) -> Self {
        Self {
            key: key.to_string(),
            occurrences: vec![Occurrence {
                instant,
                gap_from_previous: Duration::ZERO,
            }],
            total_gap: Duration::ZERO,
        }
    }

    fn link(&mut self, instant: DateTime<Utc>) {
        let gap = self
            .occurrences
            .last()
            .map(|last| (instant - last.instant).to_std().unwrap_or(Duration::ZERO))
            .unwrap_or(Duration::ZERO);
        self.occurrences.push(Occurrence {
            instant,
            gap_from_previous: gap,
        });
        self.total_gap = self.total_gap.saturating_add(gap);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn total_gap(&self) -> Duration {
        self.total_gap
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Mean gap in seconds, or `None` when there is only one occurrence.
    pub fn average_gap_seconds(&self) -> Option<f64> {
        let intervals = self.occurrences.len().checked_sub(1).filter(|n| *n > 0)?;
        Some(self.total_gap.as_secs_f64() / intervals as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Series keyed by event text, iterated in first-seen chronological order.
pub struct AggregationResult {
    series: Vec<EventSeries>,
    index: HashMap<String, usize>,
}

impl AggregationResult {
    pub fn get(&self, key: &str) -> Option<&EventSeries> {
        self.index.get(key).map(|position| &self.series[*position])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(EventSeries::key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn record(&mut self, key: &str, instant: DateTime<Utc>) {
        match self.index.get(key) {
            Some(position) => self.series[*position].link(instant),
            None => {
                self.index.insert(key.to_string(), self.series.len());
                self.series.push(EventSeries::start(key, instant));
            }
        }
    }
}

impl<'a> IntoIterator for &'a AggregationResult {
    type Item = &'a EventSeries;
    type IntoIter = std::slice::Iter<'a, EventSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

fn event_key_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EVENT_KEY_PATTERN).expect("event key pattern is valid"))
}

/// Returns true when the whole text is a valid event key.
pub fn is_event_key(text: &str) -> bool {
    event_key_regex().is_match(text)
}

/// Builds per-key series from an unordered list of raw events.
///
/// Events whose text is not a valid key or whose timestamp does not parse are
/// skipped. Remaining events are stably sorted by parsed instant before they
/// are linked, so delivery order never affects gaps.
pub fn aggregate(events: &[RawEvent]) -> AggregationResult {
    let mut accepted = Vec::with_capacity(events.len());
    for event in events {
        if !is_event_key(&event.text) {
            trace!(text = %event.text, "skipping message that is not an event key");
            continue;
        }
        match parse_slack_timestamp(&event.timestamp) {
            Ok(instant) => accepted.push((instant, event.text.as_str())),
            Err(error) => {
                debug!(key = %event.text, %error, "skipping event with malformed timestamp");
            }
        }
    }
    accepted.sort_by_key(|(instant, _)| *instant);

    let mut result = AggregationResult::default();
    for (instant, key) in accepted {
        result.record(key, instant);
    }
    debug!(
        received = events.len(),
        keys = result.len(),
        "aggregated event series"
    );
    result
}
