//! Fuzz target for box-format tag parsing.
//!
//! Feeds arbitrary UTF-8 tags to the `BoxFormat` parser, checking for
//! panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelkit::geometry::BoxFormat;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 {
        return;
    }

    let Ok(tag) = std::str::from_utf8(data) else {
        return;
    };

    let _ = tag.parse::<BoxFormat>();
});
