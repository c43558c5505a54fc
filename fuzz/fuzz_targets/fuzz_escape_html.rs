//! Fuzz target for HTML escaping.
//!
//! Escaped output must never contain a raw markup-special character.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rv_render::escape_html;

fuzz_target!(|data: &str| {
    let escaped = escape_html(data);
    assert!(!escaped.contains(['<', '>', '"', '\'']));
});
