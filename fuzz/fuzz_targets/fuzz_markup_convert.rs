//! Fuzz target for the structured-text converter.
//!
//! Report text comes from a model on the server, so conversion must cope
//! with anything. Also checks that the escaped pipeline never emits a raw
//! `<script` tag.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rv_render::{convert, render_report};

fuzz_target!(|data: &str| {
    let _ = convert(data);

    let html = render_report(data);
    assert!(!html.contains("<script"), "escaped report leaked a script tag");
});
