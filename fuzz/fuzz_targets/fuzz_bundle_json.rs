//! Fuzz target for report-data bundle decoding.
//!
//! The bundle arrives over the network; decoding should only ever fail with
//! an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rv_common::ReportBundle;

fuzz_target!(|data: &str| {
    if let Ok(bundle) = ReportBundle::from_json(data) {
        let json = bundle.to_json().expect("decoded bundle re-serializes");
        let again = ReportBundle::from_json(&json).expect("re-serialized bundle decodes");
        assert_eq!(again, bundle);
    }
});
