//! Fuzz target for box-list CSV record parsing.
//!
//! Feeds arbitrary UTF-8 records to the CSV box parser, checking for
//! panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelkit::io_boxes::fuzz_parse_box_record;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(record) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_parse_box_record(record);
});
