//! Aggregation and reporting core for cadence.
//!
//! Turns a flat list of timestamped message texts into per-key occurrence
//! series with inter-arrival gaps, and renders them as a deterministic
//! plain-text report.

pub mod aggregator;
pub mod report_zone;
pub mod reporter;
pub mod timestamp;

pub use aggregator::{
    aggregate, is_event_key, AggregationResult, EventSeries, Occurrence, RawEvent,
};
pub use report_zone::{PosixZone, ReportZone};
pub use reporter::{format_gap, render, write_report, REPORT_HEADER};
pub use timestamp::{parse_slack_timestamp, TimestampError};
