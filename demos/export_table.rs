//! Export a loan amortization schedule as CSV and/or XLSX.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example export_table -- --principal 250000 --rate 6.5 --years 30 -o out/
//! ```
//!
//! Options can also come from a YAML file; command-line flags win:
//! ```sh
//! cargo run --example export_table -- --config export.yaml --format xlsx -o out/
//! ```
//!
//! Set `RUST_LOG=debug` to see what the exporter does.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use tabex::{Cell, ExportFormat, ExportOptions, Exporter, Table};

/// Export a loan amortization schedule
#[derive(Parser, Debug)]
#[command(name = "export_table", version)]
struct Args {
    /// Loan amount
    #[arg(long, default_value_t = 250_000.0)]
    principal: f64,

    /// Annual interest rate, in percent
    #[arg(long, default_value_t = 6.5)]
    rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    years: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "both")]
    format: FormatArg,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Base file name, before sanitizing and the date suffix
    #[arg(long, default_value = "Loan Schedule")]
    name: String,

    /// YAML file with export options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Worksheet name
    #[arg(long)]
    sheet_name: Option<String>,

    /// Leave the date out of file names
    #[arg(long)]
    no_date: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [ExportFormat] {
        match self {
            FormatArg::Csv => &[ExportFormat::Csv],
            FormatArg::Xlsx => &[ExportFormat::Xlsx],
            FormatArg::Both => &[ExportFormat::Csv, ExportFormat::Xlsx],
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly schedule with a header row and a closing totals row.
fn amortization(principal: f64, annual_rate_percent: f64, years: u32) -> Table {
    let months = years * 12;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / f64::from(months.max(1))
    } else {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-f64::from(months)))
    };

    let mut table = Table::new();
    table.push_row(["Month", "Payment", "Principal", "Interest", "Balance"]);

    let mut balance = principal;
    let mut total_interest = 0.0;
    for month in 1..=months {
        let interest = balance * monthly_rate;
        let principal_part = (payment - interest).min(balance);
        balance -= principal_part;
        total_interest += interest;
        table.push_row([
            Cell::from(month),
            Cell::from(round_cents(principal_part + interest)),
            Cell::from(round_cents(principal_part)),
            Cell::from(round_cents(interest)),
            Cell::from(round_cents(balance.max(0.0))),
        ]);
    }

    table.push_row([
        Cell::from("Total interest"),
        Cell::Empty,
        Cell::Empty,
        Cell::from(round_cents(total_interest)),
        Cell::Empty,
    ]);
    table
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => serde_saphyr::from_str::<ExportOptions>(&fs::read_to_string(path)?)?,
        None => ExportOptions::default(),
    };
    if let Some(sheet_name) = args.sheet_name {
        options.sheet_name = sheet_name;
    } else if args.config.is_none() {
        options.sheet_name = "Amortization".to_string();
    }
    if args.no_date {
        options.date_suffix = false;
    }

    if !args.output.exists() {
        fs::create_dir_all(&args.output)?;
    }

    let table = amortization(args.principal, args.rate, args.years);
    info!("built schedule with {} rows", table.len());

    let exporter = Exporter::new(options);
    for &format in args.format.formats() {
        let file = exporter.export(&table, &args.name, format)?;
        let path = file.save_in(&args.output)?;
        println!("✓ {} ({} bytes, {})", path.display(), file.bytes.len(), file.mime_type);
    }

    Ok(())
}
