use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fixmyblock::{
    aggregate::{self, NormalizedReport, SafetyVerdict},
    config::ApiConfig,
    export::ReportSheet,
    report::{ImageAttachment, Location, ProblemType, Report, School, WireReport},
    server::{ReportsApiClient, ReportsBackend},
    submission::{submit_report, ReportForm},
};

#[derive(Parser)]
struct CliParser {
    /// Base URL of the reports API.
    #[arg(long, env = ApiConfig::ENV_BASE_URL, default_value = ApiConfig::DEFAULT_BASE_URL)]
    api_url: String,

    /// Give up on requests after this many seconds.
    #[arg(long, env = ApiConfig::ENV_TIMEOUT_SECS)]
    timeout_secs: Option<u64>,

    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report a problem at a location.
    Submit {
        /// Latitude of the problem, in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of the problem, in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// One of: speeding, graffiti, abandoned-vehicle, tree-issue,
        /// parking-violation, water-leak, dead-animal, broken-sign,
        /// traffic-signal, noise, trash, other.
        #[arg(long)]
        problem_type: Option<ProblemType>,
        /// The speeding happens near a school.
        #[arg(long)]
        near_school: bool,
        /// Which school, e.g. "Lincoln Elementary".
        #[arg(long)]
        school: Option<School>,
        /// Extra description.
        #[arg(long, default_value = "")]
        description: String,
        /// Photo of the problem.
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List every report.
    List {
        /// Print the reports as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show one report.
    Get {
        id: String,
        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the map markers derived from all reports.
    Markers {
        /// Print a GeoJSON FeatureCollection.
        #[arg(long)]
        geojson: bool,
    },
    /// Check whether speeding has been reported near a school.
    Safety { school: School },
    /// Save a report as a one-page PDF.
    ExportPdf {
        id: String,
        /// Directory to write `report-<id>.pdf` into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = CliParser::parse();

    let mut config = ApiConfig::new(&cli_args.api_url)?;
    if let Some(secs) = cli_args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let driver = FixMyBlock::new(ReportsApiClient::new(config)?);

    match cli_args.command {
        Command::Submit {
            lat,
            lng,
            problem_type,
            near_school,
            school,
            description,
            image,
        } => {
            let mut form = ReportForm::new();
            if let Some(location) = Location::from_parts(lat, lng) {
                form.pick_location(location);
            }
            if let Some(problem_type) = problem_type {
                form.select_problem_type(problem_type);
            }
            if near_school || school.is_some() {
                form.answer_near_school(true);
            }
            if let Some(school) = school {
                form.select_school(school);
            }
            form.set_description(description);
            if let Some(path) = image {
                form.attach_image(ImageAttachment::read(&path)?);
            }

            let notice = submit_report(&driver.backend, &mut form).await;
            println!("{notice}");
            if !notice.is_success() {
                std::process::exit(1);
            }
        }
        Command::List { json } => {
            let reports = driver.fetch_reports().await?;
            if json {
                print_json(reports.iter().map(|r| &r.report))?;
            } else if reports.is_empty() {
                println!("No reports yet. Be the first to report a problem!");
            } else {
                for report in &reports {
                    println!("{}", describe(report));
                }
            }
        }
        Command::Get { id, json } => {
            let Some(report) = driver.fetch_report(&id).await? else {
                bail!("report {id} not found");
            };
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&WireReport::from(&report.report))?
                );
            } else {
                println!("{}", describe(&report));
            }
        }
        Command::Markers { geojson } => {
            let reports = driver.fetch_reports().await?;
            let markers = aggregate::markers(reports.iter().map(|r| &r.report));
            if geojson {
                println!("{}", aggregate::markers_to_geojson(&markers));
            } else {
                for marker in markers {
                    println!(
                        "{}\t{:.6}\t{:.6}\t{}",
                        marker.id.as_deref().unwrap_or("-"),
                        marker.lat,
                        marker.lng,
                        marker.label
                    );
                }
            }
        }
        Command::Safety { school } => {
            let reports = driver.fetch_reports().await?;
            let verdict = SafetyVerdict::check(reports.iter().map(|r| &r.report), school.name());
            println!("{verdict}");
        }
        Command::ExportPdf { id, out } => {
            let Some(report) = driver.fetch_report(&id).await? else {
                bail!("report {id} not found");
            };
            let sheet = ReportSheet::for_report(&report);
            let path = out.join(&sheet.file_name);
            std::fs::write(&path, sheet.render()?)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

struct FixMyBlock<B> {
    backend: B,
}

impl<B: ReportsBackend> FixMyBlock<B> {
    fn new(backend: B) -> Self {
        Self { backend }
    }

    async fn fetch_reports(&self) -> Result<Vec<NormalizedReport>> {
        let reports = self.backend.list_all().await?;
        Ok(aggregate::normalize(reports, Utc::now()))
    }

    async fn fetch_report(&self, id: &str) -> Result<Option<NormalizedReport>> {
        let report = self.backend.get_by_id(id).await?;
        Ok(report.map(|report| NormalizedReport::new(report, Utc::now())))
    }
}

fn print_json<'a>(reports: impl Iterator<Item = &'a Report>) -> Result<()> {
    let wire: Vec<WireReport> = reports.map(WireReport::from).collect();
    println!("{}", serde_json::to_string_pretty(&wire)?);
    Ok(())
}

fn describe(normalized: &NormalizedReport) -> String {
    let report = &normalized.report;
    let mut text = format!(
        "[{}] {} ({})",
        report.id_or_empty(),
        report.problem_type.label(),
        normalized.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(location) = report.location {
        text.push_str(&format!("\n  at {location}"));
    }
    if let Some(school) = report.school_name() {
        text.push_str(&format!("\n  near {school}"));
    } else if report.is_near_school() == Some(true) {
        text.push_str("\n  near a school");
    }
    let description = if report.description.is_empty() {
        "No description"
    } else {
        report.description.as_str()
    };
    text.push_str(&format!("\n  {description}"));
    if let Some(url) = &report.image_url {
        text.push_str(&format!("\n  photo: {url}"));
    }

    text
}
