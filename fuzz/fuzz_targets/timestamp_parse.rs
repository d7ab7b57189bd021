#![no_main]

use cadence_core::parse_slack_timestamp;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    if let Ok(instant) = parse_slack_timestamp(&raw) {
        assert!(raw.contains('.'));
        let _ = instant.timestamp();
    }
});
