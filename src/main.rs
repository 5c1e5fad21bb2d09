use anyhow::Context;
use clap::Parser;
use market_hotspot::{ListingSource, MarketAnalyzer, ZeroAreaPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    version,
    about = "Analyzes real-estate listings to identify neighborhood price-growth hotspots",
    long_about = None
)]
struct Cli {
    /// Path to the listing file (CSV, or JSON array when the extension is .json)
    #[arg(short = 'I', long)]
    input: PathBuf,

    /// Output format (json or csv)
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Number of top-growth neighborhoods to include in JSON output
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Include only neighborhoods matching these patterns (glob format, e.g., "*town")
    #[arg(short = 'i', long = "include")]
    include_patterns: Vec<String>,

    /// Exclude neighborhoods matching these patterns
    #[arg(short = 'e', long = "exclude")]
    exclude_patterns: Vec<String>,

    /// Skip listings with zero area instead of rejecting the whole dataset
    #[arg(long, default_value_t = false)]
    skip_zero_area: bool,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.format != "json" && cli.format != "csv" {
        anyhow::bail!("Unsupported output format: {}", cli.format);
    }

    let source = ListingSource::open(&cli.input, cli.include_patterns, cli.exclude_patterns)
        .context("Failed to open listing file")?;
    let listings = source.listings().context("Failed to read listings")?;

    let policy = if cli.skip_zero_area {
        ZeroAreaPolicy::Skip
    } else {
        ZeroAreaPolicy::Reject
    };
    let mut report = MarketAnalyzer::new(policy)
        .analyze(listings)
        .context("Failed to analyze listings")?;

    eprintln!(
        "HOTSPOT DETECTED: {} with {:.2}% growth between {} and {}",
        report.hotspot.neighborhood, report.hotspot.growth_pct, report.old_date, report.new_date
    );

    match cli.format.as_str() {
        "json" => {
            report
                .growth
                .sort_by(|a, b| b.growth_pct.total_cmp(&a.growth_pct));
            report.growth.truncate(cli.top);
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize to JSON")?
            );
        }
        _ => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in report.rows {
                wtr.serialize(row).context("Failed to write CSV record")?;
            }
            wtr.flush().context("Failed to flush CSV writer")?;
        }
    }

    Ok(())
}
