//! Plain-text rendering of aggregated event series.

use std::{io::Write, time::Duration};

use crate::{aggregator::AggregationResult, report_zone::ReportZone};

pub const REPORT_HEADER: &str = "Result:";

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Renders the report as individual lines, header first.
///
/// Series appear in the result's iteration order. Each series lists its
/// occurrences with 1-based indices and, when it has more than one
/// occurrence, closes with the mean gap in seconds.
pub fn render(result: &AggregationResult, zone: &ReportZone) -> Vec<String> {
    let mut lines = vec![REPORT_HEADER.to_string()];
    for series in result {
        lines.push(format!("{} : {} times", series.key(), series.len()));
        for (index, occurrence) in series.occurrences().iter().enumerate() {
            lines.push(format!(
                "{} : {} : {}",
                index + 1,
                zone.format_instant(occurrence.instant),
                format_gap(occurrence.gap_from_previous)
            ));
        }
        if let Some(average) = series.average_gap_seconds() {
            lines.push(format!("average: {average} s"));
        }
    }
    lines
}

/// Writes the rendered report to `writer`, one line per `\n`.
pub fn write_report<W: Write>(
    result: &AggregationResult,
    zone: &ReportZone,
    writer: &mut W,
) -> std::io::Result<()> {
    for line in render(result, zone) {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Formats a gap using the largest fitting units, e.g. `10s`, `1m30s`,
/// `1h0m5s`, `1.5s`, `250ms`.
pub fn format_gap(gap: Duration) -> String {
    let total_nanos = gap.as_nanos();
    if total_nanos == 0 {
        return "0s".to_string();
    }
    if total_nanos < NANOS_PER_MICRO {
        return format!("{total_nanos}ns");
    }
    if total_nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal_units(total_nanos, NANOS_PER_MICRO));
    }
    if total_nanos < NANOS_PER_SECOND {
        return format!("{}ms", decimal_units(total_nanos, NANOS_PER_MILLI));
    }

    let whole_seconds = gap.as_secs();
    let hours = whole_seconds / 3_600;
    let minutes = (whole_seconds % 3_600) / 60;
    let second_nanos =
        u128::from(whole_seconds % 60) * NANOS_PER_SECOND + u128::from(gap.subsec_nanos());
    let seconds = decimal_units(second_nanos, NANOS_PER_SECOND);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

fn decimal_units(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
