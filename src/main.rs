//! Cradle CLI
//!
//! Command-line front end for the analysis backend:
//! - Check backend status
//! - Parse or process a log file
//! - Print any dashboard page
//! - Dump events and daily summaries

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cradle::api::{CareApi, DateRange, EventFilter, HttpClient};
use cradle::config::{generate_default_config, Config};
use cradle::pages::{self, SummaryCard, UploadMode};
use cradle::view::{drive, FetchTracker, Loaded, ViewState};
use cradle::ClientError;

#[derive(Parser)]
#[command(name = "cradle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infant-care log dashboard in the terminal")]
#[command(long_about = "Cradle talks to the log analysis backend.\nParse a log file, then inspect sleep, feeding, vomiting and growth.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and CRADLE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the backend is up
    Status,

    /// Parse a log file on the server
    Parse {
        /// Server-side path (default: the backend's own log file)
        path: Option<String>,
    },

    /// Parse a log file and run the full analysis
    Process {
        /// Server-side path (default: the backend's own log file)
        path: Option<String>,
    },

    /// Re-run the analysis over already parsed data
    Analyze,

    /// Overview page
    Dashboard,

    /// Sleep analysis page
    Sleep,

    /// Feeding analysis page
    Feeding,

    /// Vomit correlation page
    Vomit,

    /// Growth page
    Growth,

    /// List events
    Events {
        /// Category (sleep, wake, milk, food, pee, poop, vomit, ...)
        #[arg(short, long)]
        category: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Per-day aggregates
    Daily {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Write CSV to stdout
        #[arg(long)]
        csv: bool,
    },

    /// Print the download URL of a CSV export
    CsvUrl {
        /// events.csv, daily_summary.csv or growth.csv
        file: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.apply_overrides(|key| (key == "CRADLE_API_URL").then(|| url.clone()));
    }

    init_logging(&config);
    tracing::debug!(base_url = %config.api.base_url, "Cradle v{}", env!("CARGO_PKG_VERSION"));

    let api = HttpClient::new(&config.api.base_url);
    let format = cli.format;

    match cli.command {
        Commands::Status => {
            let health = api
                .health()
                .await
                .with_context(|| format!("Backend unreachable at {}", api.base_url()))?;
            if !health.is_healthy() {
                bail!("Backend reported status {:?}", health.status);
            }
            println!("Backend:   {}", api.base_url());
            println!("Status:    {}", health.status);
            if let Some(ts) = health.timestamp {
                println!("Timestamp: {}", ts);
            }
        }

        Commands::Parse { path } => {
            let path = path.unwrap_or_default();
            run_page(format, pages::upload::submit(&api, UploadMode::Parse, &path), |r: &pages::UploadResult| {
                print_cards(&r.cards);
                if let Some(msg) = &r.message {
                    println!("\n{}", msg);
                }
            })
            .await?;
        }

        Commands::Process { path } => {
            let path = path.unwrap_or_default();
            run_page(format, pages::upload::submit(&api, UploadMode::Process, &path), |r: &pages::UploadResult| {
                print_cards(&r.cards);
                println!("\nAnalysis: {}", if r.analyzed { "updated" } else { "not returned" });
            })
            .await?;
        }

        Commands::Analyze => {
            let analysis = api.analyze().await?.into_result()?;
            println!(
                "{}",
                if analysis.is_some() {
                    "Analysis complete"
                } else {
                    "Analysis returned no data"
                }
            );
        }

        Commands::Dashboard => {
            run_page(format, pages::dashboard::load(&api), |v: &pages::DashboardView| {
                print_cards(&v.cards);
                print_series("睡眠 (時間)", v.sleep_series.iter().map(|p| (p.date.as_str(), p.value)));
                print_series("授乳量 (ml)", v.milk_series.iter().map(|p| (p.date.as_str(), p.value)));
                print_series("体重 (kg)", v.weight_series.iter().map(|p| (p.date.as_str(), p.value)));
                print_series("身長 (cm)", v.height_series.iter().map(|p| (p.date.as_str(), p.value)));
                if !v.correlations.is_empty() {
                    println!("\n相関");
                    for row in &v.correlations {
                        println!("  {:<24} {:>6.2}  {}", row.label, row.coefficient, row.strength);
                    }
                }
                if let Some(text) = &v.summary_text {
                    println!("\n{}", text);
                }
            })
            .await?;
        }

        Commands::Sleep => {
            run_page(format, pages::sleep::load(&api), |v: &pages::SleepView| {
                print_cards(&v.cards);
                print_buckets("入眠時刻", &v.start_distribution);
                print_buckets("起床時刻", &v.wake_distribution);
            })
            .await?;
        }

        Commands::Feeding => {
            run_page(format, pages::feeding::load(&api), |v: &pages::FeedingView| {
                print_cards(&v.cards);
                print_buckets("授乳時刻", &v.milk_distribution);
                print_buckets("離乳食時刻", &v.food_distribution);
            })
            .await?;
        }

        Commands::Vomit => {
            run_page(format, pages::vomit::load(&api), |v: &pages::VomitView| {
                print_cards(&v.cards);
                println!("\n相関");
                for row in &v.correlations {
                    println!(
                        "  {:<24} {:>6.2}  p={:.3}{}  {}",
                        row.label,
                        row.coefficient,
                        row.p_value,
                        if row.significant { "*" } else { " " },
                        row.strength
                    );
                }
                print_buckets("時間帯", &v.hourly);
                print_buckets("程度", &v.severity);
                if v.secondary_unavailable {
                    println!("\n(日次データを取得できなかったため一部のグラフは空です)");
                }
            })
            .await?;
        }

        Commands::Growth => {
            run_page(format, pages::growth::load(&api), |v: &pages::GrowthView| {
                print_cards(&v.cards);
                if let Some(w) = &v.weight {
                    print_series("体重 (kg)", w.series.iter().map(|p| (p.date.as_str(), p.value)));
                }
                if let Some(h) = &v.height {
                    print_series("身長 (cm)", h.series.iter().map(|p| (p.date.as_str(), p.value)));
                }
                if let Some(t) = &v.temperature {
                    print_series("体温 (℃, 日ごとの最高)", t.series.iter().map(|p| (p.date.as_str(), p.value)));
                }
            })
            .await?;
        }

        Commands::Events { category, from, to } => {
            let filter = EventFilter {
                category,
                start_date: from,
                end_date: to,
            };
            let events = api.events(&filter).await?.into_result()?.unwrap_or_default();
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("No events");
            } else {
                println!("{:<20} | {:<8} | {:<24} | {:>8} | unit", "datetime", "category", "type", "value");
                println!("{}", "-".repeat(74));
                for e in &events {
                    println!(
                        "{:<20} | {:<8} | {:<24} | {:>8} | {}",
                        e.datetime.as_deref().or(e.date.as_deref()).unwrap_or("-"),
                        e.category,
                        e.kind.as_deref().unwrap_or("-"),
                        e.value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".into()),
                        e.unit.as_deref().unwrap_or("")
                    );
                }
                println!("\n{} events", events.len());
            }
        }

        Commands::Daily { from, to, csv } => {
            let range = DateRange {
                start_date: from,
                end_date: to,
            };
            let rows = api.daily_summary(&range).await?.into_result()?.unwrap_or_default();
            if csv {
                let mut writer = csv::Writer::from_writer(std::io::stdout());
                for row in &rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            } else if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!(
                    "{:<12} | {:>6} | {:>6} | {:>4} | {:>4} | {:>4} | {:>4}",
                    "date", "sleep", "milk", "feed", "pee", "poop", "vomit"
                );
                println!("{}", "-".repeat(62));
                for r in &rows {
                    println!(
                        "{:<12} | {:>6.1} | {:>6.0} | {:>4.0} | {:>4.0} | {:>4.0} | {:>4.0}",
                        cradle::api::dto::calendar_day(&r.date),
                        cradle::metrics::minutes_to_hours(r.sleep_minutes),
                        r.milk_amount,
                        r.milk_count,
                        r.pee_count,
                        r.poop_count,
                        r.vomit_count
                    );
                }
            }
        }

        Commands::CsvUrl { file } => {
            println!("{}", api.csv_url(&file)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            if let Some(path) = output {
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            } else {
                println!("{}", content);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cradle={}", config.logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run a page loader once and print whatever state it ends in
async fn run_page<T, Fut>(format: OutputFormat, load: Fut, table: impl Fn(&T)) -> anyhow::Result<()>
where
    T: Clone + Serialize,
    Fut: Future<Output = Result<Loaded<T>, ClientError>>,
{
    let tracker = FetchTracker::new();
    match drive(&tracker, |_| {}, load).await {
        Some(ViewState::Ready(view)) => {
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                table(&view);
            }
        }
        Some(ViewState::Empty) => {
            println!("データがありません。先に `cradle process <PATH>` でログを取り込んでください。");
        }
        Some(ViewState::Error(banner)) => bail!(banner.message),
        Some(ViewState::Loading) | None => bail!("Fetch did not complete"),
    }
    Ok(())
}

fn print_cards(cards: &[SummaryCard]) {
    for card in cards {
        match &card.detail {
            Some(detail) => println!("{:<20} {:<14} ({})", card.label, card.value, detail),
            None => println!("{:<20} {}", card.label, card.value),
        }
    }
}

fn print_series<'a>(title: &str, points: impl Iterator<Item = (&'a str, f64)>) {
    let points: Vec<_> = points.collect();
    if points.is_empty() {
        return;
    }
    println!("\n{}", title);
    for (date, value) in points {
        println!("  {:<12} {:>8.1}", date, value);
    }
}

fn print_buckets(title: &str, buckets: &[cradle::charts::DistributionBucket]) {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    if max == 0 {
        println!("\n{}: データなし", title);
        return;
    }
    println!("\n{}", title);
    for b in buckets.iter().filter(|b| b.count > 0) {
        let width = (b.count * 30 / max) as usize;
        println!("  {:>6} {:>4} {}", b.label, b.count, "█".repeat(width.max(1)));
    }
}
