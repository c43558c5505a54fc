//! Fuzz target for ingest log-file name parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rv_common::host_map::parse_log_name;

fuzz_target!(|data: &str| {
    if let Some((host, date)) = parse_log_name(data) {
        assert!(!host.is_empty());
        assert!(!date.is_empty());
        assert!(!host.contains("--"));
    }
});
