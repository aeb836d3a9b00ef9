mod error;
mod model;
mod output;
mod parser;
mod scraper;
mod settings;
mod stats;
mod validate;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;

use error::{ScrapeError, StructureFailure};
use model::{Chamber, PoliticianRecord, StatsScope};
use output::{DirSink, Sink};
use parser::Extraction;
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "diet_stances",
    about = "Diet member stances on separate surnames and same-sex marriage, scraped into JSON"
)]
struct Cli {
    /// Output directory (default: static/politicians, or DIET_OUT_DIR)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,
    /// Which artifacts to write
    #[arg(long, global = true, value_enum, default_value_t = Mode::Combined)]
    mode: Mode,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both chambers, extract, validate and write JSON (default)
    Run,
    /// Extract from a saved result page instead of fetching it
    Parse {
        #[arg(short, long, value_enum)]
        chamber: Chamber,
        /// Path to the saved HTML page
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Recompute statistics from a politicians JSON file and print them
    Stats {
        /// Path to a politicians JSON array
        #[arg(short, long)]
        input: PathBuf,
        /// Only count members of this chamber
        #[arg(short, long, value_enum)]
        chamber: Option<Chamber>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// politicians.json + statistics.json over both chambers
    Combined,
    /// politicians-<chamber>.json + statistics-<chamber>.json
    PerChamber,
    /// Both of the above
    Both,
}

impl Mode {
    fn combined(self) -> bool {
        matches!(self, Mode::Combined | Mode::Both)
    }

    fn per_chamber(self) -> bool {
        matches!(self, Mode::PerChamber | Mode::Both)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(dir) = cli.out_dir {
        settings.out_dir = dir;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&settings, cli.mode).await?,
        Commands::Parse { chamber, file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let extraction = parser::extract_chamber(chamber, &html, current_year())?;
            let mut sink = DirSink::create(&settings.out_dir)?;
            output::write_chamber(&mut sink, chamber, &extraction.records)?;
            print_summary(&extraction);
        }
        Commands::Stats { input, chamber } => {
            let json = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut records: Vec<PoliticianRecord> = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a politicians JSON array", input.display()))?;
            let scope = match chamber {
                Some(c) => {
                    records.retain(|r| r.chamber == c);
                    StatsScope::from(c)
                }
                None => StatsScope::All,
            };
            println!("{}", output::to_json(&stats::generate(&records, scope))?);
            return Ok(());
        }
    }

    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

/// Both chambers are independent, so they are fetched and parsed concurrently.
async fn run(settings: &Settings, mode: Mode) -> Result<()> {
    let client = scraper::client(settings)?;
    let max_year = current_year();

    let (representatives, councillors) = tokio::join!(
        scraper::scrape_chamber(
            &client,
            Chamber::Representatives,
            settings.url(Chamber::Representatives),
            max_year,
        ),
        scraper::scrape_chamber(
            &client,
            Chamber::Councillors,
            settings.url(Chamber::Councillors),
            max_year,
        )
    );

    let mut sink = DirSink::create(&settings.out_dir)?;
    write_outputs(&mut sink, mode, representatives, councillors)?;
    println!("Output written to {}", sink.dir().display());
    Ok(())
}

/// Write whatever `mode` asks for. A successful chamber's own files are
/// written even if the other chamber failed; combined files need both. The
/// first failure is returned after that.
fn write_outputs(
    sink: &mut dyn Sink,
    mode: Mode,
    representatives: Result<Extraction, ScrapeError>,
    councillors: Result<Extraction, ScrapeError>,
) -> Result<()> {
    let mut extractions = Vec::new();
    let mut failure = None;

    for result in [representatives, councillors] {
        match result {
            Ok(extraction) => {
                if mode.per_chamber() {
                    output::write_chamber(sink, extraction.chamber, &extraction.records)?;
                }
                print_summary(&extraction);
                extractions.push(extraction);
            }
            Err(e) => {
                error!(error = %e, "chamber extraction failed");
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }

    if let Some(e) = failure {
        return Err(e.into());
    }

    if mode.combined() {
        let all: Vec<PoliticianRecord> = extractions.into_iter().flat_map(|e| e.records).collect();
        output::write_combined(sink, &all)?;
        println!("Combined data for {} politicians saved as {}", all.len(), output::RECORDS_FILE);
    }
    Ok(())
}

fn print_summary(extraction: &Extraction) {
    let years: Vec<String> = extraction.election_years.iter().map(|y| y.to_string()).collect();
    println!(
        "{}: {} politicians across {} election years ({}), {} warnings",
        extraction.chamber,
        extraction.records.len(),
        years.len(),
        years.join(", "),
        extraction.warnings.len()
    );
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use output::MemorySink;

    fn extraction(chamber: Chamber, year: i32) -> Extraction {
        Extraction {
            chamber,
            records: vec![PoliticianRecord {
                chamber,
                district: "東京都".into(),
                name: "山田太郎".into(),
                party: "公明党".into(),
                separate_last_name: model::AGREE.into(),
                same_sex_marriage: model::DISAGREE.into(),
                election_year: year,
            }],
            election_years: vec![year],
            warnings: Vec::new(),
        }
    }

    fn no_records(chamber: Chamber) -> ScrapeError {
        ScrapeError::structure(
            chamber,
            StructureFailure::NoRecords {
                years: vec![2022],
                last_section: None,
            },
        )
    }

    fn names(sink: &MemorySink) -> Vec<&str> {
        sink.written.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn combined_mode_writes_both_chambers_together() {
        let mut sink = MemorySink::default();
        write_outputs(
            &mut sink,
            Mode::Combined,
            Ok(extraction(Chamber::Representatives, 2024)),
            Ok(extraction(Chamber::Councillors, 2022)),
        )
        .unwrap();
        assert_eq!(names(&sink), vec![output::RECORDS_FILE, output::STATISTICS_FILE]);
        let all: Vec<PoliticianRecord> = serde_json::from_str(&sink.written[0].1).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn both_mode_writes_every_artifact() {
        let mut sink = MemorySink::default();
        write_outputs(
            &mut sink,
            Mode::Both,
            Ok(extraction(Chamber::Representatives, 2024)),
            Ok(extraction(Chamber::Councillors, 2022)),
        )
        .unwrap();
        assert_eq!(
            names(&sink),
            vec![
                "politicians-representatives.json",
                "statistics-representatives.json",
                "politicians-councillors.json",
                "statistics-councillors.json",
                output::RECORDS_FILE,
                output::STATISTICS_FILE,
            ]
        );
    }

    #[test]
    fn per_chamber_mode_keeps_the_successful_chamber() {
        let mut sink = MemorySink::default();
        let err = write_outputs(
            &mut sink,
            Mode::PerChamber,
            Ok(extraction(Chamber::Representatives, 2024)),
            Err(no_records(Chamber::Councillors)),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("councillors page"));
        assert_eq!(
            names(&sink),
            vec!["politicians-representatives.json", "statistics-representatives.json"]
        );
    }

    #[test]
    fn combined_mode_writes_nothing_when_a_chamber_fails() {
        let mut sink = MemorySink::default();
        let err = write_outputs(
            &mut sink,
            Mode::Combined,
            Err(no_records(Chamber::Representatives)),
            Ok(extraction(Chamber::Councillors, 2022)),
        )
        .unwrap_err();
        assert!(err.downcast_ref::<ScrapeError>().is_some());
        assert!(sink.written.is_empty());
    }

    #[test]
    fn first_failure_is_reported() {
        let mut sink = MemorySink::default();
        let err = write_outputs(
            &mut sink,
            Mode::Both,
            Err(no_records(Chamber::Representatives)),
            Err(no_records(Chamber::Councillors)),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("representatives page"));
        assert!(sink.written.is_empty());
    }
}
