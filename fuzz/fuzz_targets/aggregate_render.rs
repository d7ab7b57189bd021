#![no_main]

use cadence_core::{aggregate, is_event_key, render, RawEvent, ReportZone, REPORT_HEADER};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let events = raw
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(text, ts)| RawEvent::new(text, ts))
        .collect::<Vec<_>>();
    let result = aggregate(&events);
    for series in &result {
        assert!(is_event_key(series.key()));
        assert!(!series.is_empty());
    }
    let zone = ReportZone::from_iana("UTC").unwrap_or(ReportZone::HostOffset);
    let lines = render(&result, &zone);
    assert_eq!(lines.first().map(String::as_str), Some(REPORT_HEADER));
});
