#![no_main]

use freight_analyzer::io::{read_json_from_bytes, LoadOptions};
use freight_analyzer::{clean_shipments, Analyzer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(log) = read_json_from_bytes(data, "fuzz", &LoadOptions::default()) {
        let cleaned = clean_shipments(log.rows);
        let _ = Analyzer::new(&cleaned.shipments).delay_statistics();
    }
});
