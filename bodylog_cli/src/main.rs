use bodylog_core::trend::extend_date;
use bodylog_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bodylog")]
#[command(about = "Weight and height log with BMI trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Measurement log (YAML), overrides the config file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Discard samples with unrecognized units instead of warning
    #[arg(long, global = true)]
    strict_units: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print records and trend summary (default)
    Report,

    /// Report only records on or after a date, e.g. `after 24 May 2020`
    ///
    /// The keyword is accepted in any letter case.
    After {
        /// Free-text date; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        date: Vec<String>,
    },

    /// Write chart data or CSV files for plotting
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Only export records on or after this date
        #[arg(long)]
        after: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// chart.json with points, series, fit lines and BMI bands
    Json,
    /// records.csv and series.csv
    Csv,
}

fn main() -> Result<()> {
    // Initialize logging
    bodylog_core::logging::init();

    let cli = Cli::parse_from(normalize_keyword(std::env::args_os()));

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let log_path = cli.log.clone().unwrap_or_else(|| config.data.log_path.clone());

    let mut options = IngestOptions::from_config(&config);
    options.strict_units |= cli.strict_units;

    match cli.command {
        Some(Commands::Report) | None => cmd_report(&log_path, options, &config),
        Some(Commands::After { date }) => {
            let after = parse_date(&date.join(" "))?;
            cmd_report(&log_path, options.with_after(Some(after)), &config)
        }
        Some(Commands::Export { out, format, after }) => {
            let after = after.as_deref().map(parse_date).transpose()?;
            cmd_export(&log_path, options.with_after(after), &config, out, format)
        }
    }
}

/// Global options that consume the following argument
const VALUE_OPTIONS: [&str; 2] = ["--log", "--config"];

/// Lowercase the subcommand when it is `after` in any letter case
///
/// The subcommand is the first positional argument; option values and
/// anything after it keep their spelling.
fn normalize_keyword<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let mut i = 1;
    while i < args.len() {
        let Some(arg) = args[i].to_str() else {
            break;
        };
        if VALUE_OPTIONS.contains(&arg) {
            i += 2;
            continue;
        }
        if arg.starts_with('-') {
            i += 1;
            continue;
        }
        if arg.eq_ignore_ascii_case("after") {
            args[i] = OsString::from("after");
        }
        break;
    }
    args
}

fn load(log_path: &Path, options: &IngestOptions) -> Result<Ingest> {
    let doc = bodylog_core::document::load(log_path)?;
    ingest(&doc, options)
}

/// Trends, or `None` when there are too few records to derive them
fn trends_for(records: &[Record]) -> Result<Option<Trends>> {
    match compute_trends(records) {
        Ok(trends) => Ok(Some(trends)),
        Err(Error::InsufficientData(reason)) => {
            tracing::warn!("Skipping trends: {}", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn cmd_report(log_path: &Path, options: IngestOptions, config: &Config) -> Result<()> {
    let ingest = load(log_path, &options)?;

    println!("Date of birth: {}", ingest.dob);
    if ingest.cutoff != ingest.dob {
        println!("Showing records on or after {}", ingest.cutoff);
    }
    println!();

    if ingest.records.is_empty() {
        println!("No records on or after {}.", ingest.cutoff);
        display_diagnostics_summary(&ingest);
        return Ok(());
    }

    display_records(&ingest.records);

    match trends_for(&ingest.records)? {
        Some(trends) => display_trends(&trends, config.trend.fit_extension_days)?,
        None => println!("\nNot enough records for trends - showing measurements only."),
    }

    display_diagnostics_summary(&ingest);
    Ok(())
}

fn cmd_export(
    log_path: &Path,
    options: IngestOptions,
    config: &Config,
    out: PathBuf,
    format: Format,
) -> Result<()> {
    let ingest = load(log_path, &options)?;
    let trends = trends_for(&ingest.records)?;
    let extension_days = config.trend.fit_extension_days;

    match format {
        Format::Json => {
            let today = chrono::Local::now().date_naive();
            let chart = ChartData::build(&ingest.records, trends, today, extension_days)?;
            let path = out.join("chart.json");
            bodylog_core::export::write_chart_json(&path, &chart)?;
            println!("✓ Wrote chart data for {} records", ingest.records.len());
            println!("  JSON: {}", path.display());
        }
        Format::Csv => {
            let records_path = out.join("records.csv");
            let count = bodylog_core::export::write_records_csv(&records_path, &ingest.records)?;
            println!("✓ Wrote {} records", count);
            println!("  CSV: {}", records_path.display());

            if let Some(ref trends) = trends {
                let series_path = out.join("series.csv");
                let days = bodylog_core::export::write_series_csv(&series_path, trends)?;
                println!("✓ Wrote {} days of series", days);
                println!("  CSV: {}", series_path.display());
            }
        }
    }

    display_diagnostics_summary(&ingest);
    Ok(())
}

fn display_records(records: &[Record]) {
    println!(
        "  {:<10}  {:>5}  {:>9}  {:>9}  {:>6}  {}",
        "Date", "Age", "Weight kg", "Height cm", "BMI", "Class"
    );
    for r in records {
        let class = BmiClass::classify(r.bmi())
            .map(|c| c.label())
            .unwrap_or("-");
        println!(
            "  {:<10}  {:>5.1}  {:>9.2}  {:>9.2}  {:>6.2}  {}",
            r.date().to_string(),
            r.age_years(),
            r.weight_kg(),
            r.height_cm(),
            r.bmi(),
            class
        );
    }
}

fn display_trends(trends: &Trends, extension_days: i32) -> Result<()> {
    let (Some(first), Some(last)) = (trends.first_day(), trends.last_day()) else {
        return Ok(());
    };
    let projected_on = extend_date(last, extension_days)?;

    println!();
    println!("Trend {} → {} ({} days)", first, last, trends.len());
    println!(
        "  Weight: {:+.2} kg/week, {:.1} kg projected on {}",
        trends.weight_fit.slope * 7.0,
        trends.weight_fit.at(projected_on),
        projected_on
    );
    println!(
        "  BMI:    {:+.2} /week, {:.1} projected on {}",
        trends.bmi_fit.slope * 7.0,
        trends.bmi_fit.at(projected_on),
        projected_on
    );
    if let Some(latest) = trends.weight_delta.last() {
        println!("  Latest daily change: {:.1} dag lost/day", latest.value);
    }
    Ok(())
}

fn display_diagnostics_summary(ingest: &Ingest) {
    let skipped = ingest.errors().count();
    let warnings = ingest.warnings().count();
    if skipped > 0 || warnings > 0 {
        println!();
        println!("{} sample(s) skipped, {} warning(s)", skipped, warnings);
    }
}
