use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use freight_analyzer::{
    clean_log,
    io::load_shipments,
    visualization::{
        build_charts, print_clean_report, print_report, print_summary, ChartRenderer, SvgCharts,
        TerminalCharts,
    },
    Analyzer, CleanedShipments, ReportConfig,
};

#[derive(Parser)]
#[command(
    name = "freight-analyzer",
    about = "Freight Shipment Analyzer - volume and delay analysis of shipment logs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full report: cleaning summary, tables and charts
    Analyze {
        /// Path to the shipment log (CSV, JSON, or Excel)
        #[arg(short, long)]
        input: PathBuf,

        /// TOML file with report settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Field delimiter for delimited text input (use "tab" for tabs)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Number of rows in the ranked carrier/route tables
        #[arg(short, long)]
        top: Option<usize>,

        /// Directory the SVG charts are written to
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Skip writing SVG charts
        #[arg(long)]
        no_charts: bool,

        /// Also draw the charts as text bars in the terminal
        #[arg(long)]
        terminal_charts: bool,

        /// Drop rows with unparseable values instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Display a quick summary of the shipment log
    Summary {
        /// Path to the shipment log
        #[arg(short, long)]
        input: PathBuf,

        /// TOML file with report settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let config = match path {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    debug!(?config, "report configuration");
    Ok(config)
}

fn load_and_clean(input: &Path, config: &ReportConfig) -> Result<(String, CleanedShipments)> {
    let log = load_shipments(input, &config.load_options()?)?;
    let name = log.name.clone();
    Ok((name, clean_log(log)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            delimiter,
            top,
            charts_dir,
            no_charts,
            terminal_charts,
            skip_malformed,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(delimiter) = delimiter {
                config.delimiter = delimiter;
            }
            if let Some(top) = top {
                config.top_n = top;
            }
            if let Some(dir) = charts_dir {
                config.charts_dir = dir;
            }
            config.skip_malformed |= skip_malformed;
            config.validate()?;

            let (_, cleaned) = load_and_clean(&input, &config)?;
            println!("{}", "Data Loaded Successfully".bold().green());
            print_clean_report(&cleaned.report);

            let analyzer = Analyzer::new(&cleaned.shipments);
            print_report(&analyzer, config.top_n);

            let charts = build_charts(&analyzer);
            if terminal_charts {
                let terminal = TerminalCharts;
                for chart in &charts {
                    terminal.render(chart)?;
                }
            }

            if !no_charts {
                let renderer =
                    SvgCharts::new(&config.charts_dir, config.chart_width, config.chart_height);
                let written = renderer.save_all(&charts)?;
                println!(
                    "{} {} charts written to {}",
                    "Charts:".cyan().bold(),
                    written.len(),
                    renderer.dir().display()
                );
            }
        }

        Commands::Summary { input, config } => {
            let config = load_config(config.as_deref())?;
            let (name, cleaned) = load_and_clean(&input, &config)?;
            let analyzer = Analyzer::new(&cleaned.shipments);
            print_summary(&name, &cleaned.report, &analyzer);
        }
    }

    Ok(())
}
