#![no_main]

use freight_analyzer::io::{read_csv_from_bytes, LoadOptions};
use freight_analyzer::{clean_shipments, Analyzer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = LoadOptions {
        skip_malformed: true,
        ..LoadOptions::default()
    };
    if let Ok(log) = read_csv_from_bytes(data, "fuzz", &options) {
        let cleaned = clean_shipments(log.rows);
        let analyzer = Analyzer::new(&cleaned.shipments);
        let _ = analyzer.busiest_routes(10);
        let _ = analyzer.carrier_mean_delay(None);
        let _ = analyzer.status_percentages();
    }
});
