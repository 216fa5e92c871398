//! Basic report example: load a shipment log, clean it and print the tables.
//!
//! Run from the project root, optionally with a log of your own:
//!   cargo run --example basic_report -- path/to/shipments.csv

use freight_analyzer::analysis::Analyzer;
use freight_analyzer::io::{self, LoadOptions};
use freight_analyzer::visualization::{
    build_charts, format_terminal_chart, print_clean_report, print_report,
};
use freight_analyzer::{clean_log, ShipmentLog};

const SAMPLE: &str = "\
Carrier_Name,Source,Destination,DayOfWeek,Month,Shipment_Delay,Delivery_Status,Actual_Shipment_Time,Planned_TimeofTravel
FastFreight,AUS,DAL,1,3,12,1,0830,180
FastFreight,AUS,DAL,2,3,-4,0,0915,180
FastFreight,HOU,SAT,4,4,0,0,1300,150
RoadRunner,HOU,SAT,4,4,35,1,1400,150
RoadRunner,ELP,AUS,5,5,,1,1600,420
BlueLine,DAL,HOU,6,5,8,0,0700,240
";

fn main() {
    let options = LoadOptions::default();
    let log: ShipmentLog = match std::env::args().nth(1) {
        Some(path) => io::load_shipments(&path, &options).expect("Failed to read shipment log"),
        None => io::read_csv_from_bytes(SAMPLE.as_bytes(), "sample", &options)
            .expect("Failed to parse sample log"),
    };
    println!("Loaded '{}': {} rows", log.name, log.num_rows());

    let cleaned = clean_log(log);
    print_clean_report(&cleaned.report);

    let analyzer = Analyzer::new(&cleaned.shipments);
    print_report(&analyzer, 5);

    // Delivery status split as text bars
    if let Some(chart) = build_charts(&analyzer).get(4) {
        print!("{}", format_terminal_chart(chart));
    }
}
