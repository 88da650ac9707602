use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

mod assistant;
mod chat;
mod config;
mod error;
mod export;
mod fixtures;
mod logging;
mod models;
mod notifications;
mod onboarding;
mod report;
mod synth;

use synth::{DashboardSeries, Timeframe};

#[derive(Parser)]
#[command(name = "querysense")]
#[command(about = "BigQuery cost governance dashboard with synthetic data", long_about = None)]
struct Cli {
    /// Seed for the synthetic series (overrides QUERYSENSE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Catalog {
    Projects,
    Departments,
    RoiDistribution,
    Opportunities,
    LowRoi,
    TopQueries,
    Suggestions,
    Transcript,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily spend against the budget line
    Spend {
        #[arg(long, value_enum, default_value_t = Timeframe::Month)]
        timeframe: Timeframe,
    },
    /// Query execution heatmap by weekday and hour
    Heatmap,
    /// Monthly spend with forecast for the rest of the year
    Forecast,
    /// Query execution time and data scanned over two weeks
    Performance {
        /// Only the first seven days, as in the weekly chart
        #[arg(long)]
        week: bool,
    },
    /// Print one of the static catalogs
    Fixtures {
        #[arg(value_enum)]
        catalog: Catalog,
    },
    /// Ask the assistant a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive assistant session on stdin
    Chat,
    /// Show notifications, optionally acknowledging some
    #[command(group(
        ArgGroup::new("ack")
            .args(["read", "read_all"])
            .multiple(false)
    ))]
    Notifications {
        #[arg(long)]
        read: Vec<u32>,
        #[arg(long)]
        read_all: bool,
    },
    /// Walk through the welcome tour (shown automatically on first run)
    Welcome,
    /// Generate a markdown cost report
    Report {
        #[arg(long, value_enum, default_value_t = Timeframe::Month)]
        timeframe: Timeframe,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export a synthetic series as CSV
    Export {
        #[arg(value_enum)]
        series: export::Series,
        #[arg(long, value_enum, default_value_t = Timeframe::Month)]
        timeframe: Timeframe,
        #[arg(long)]
        out: PathBuf,
    },
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_tour(mut tour: onboarding::WelcomeTour) {
    println!("Welcome to QuerySense");
    while tour.is_open() {
        if let Some(feature) = tour.current() {
            println!("[{}/{}] {}", tour.step() + 1, tour.len(), feature.title);
            println!("      {}", feature.description);
        }
        tour.next();
    }
}

async fn run_tour(mut tour: onboarding::WelcomeTour) -> anyhow::Result<()> {
    println!("Welcome to QuerySense (enter: next, p: back, q: skip)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(feature) = tour.current() {
        println!("[{}/{}] {}", tour.step() + 1, tour.len(), feature.title);
        println!("      {}", feature.description);
        print!("> ");
        std::io::stdout().flush()?;

        match lines.next_line().await? {
            Some(input) => tour.handle_input(&input),
            None => tour.close(),
        }
    }
    Ok(())
}

async fn run_chat(delay: std::time::Duration) -> anyhow::Result<()> {
    let mut session = chat::ChatSession::new(delay);
    for message in session.history() {
        println!("{:?}: {}\n", message.role, message.message);
    }
    println!("Suggested questions:");
    for question in fixtures::SUGGESTED_QUESTIONS {
        println!("  - {question}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let pending = session.submit(&line)?;
        if session.is_typing() {
            println!("Assistant is typing...");
        }
        let reply = session.complete(pending).await?;
        println!("{}\n", reply.message);
    }

    info!(messages = session.history().len(), "chat session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = config::Config::from_env().context("invalid QUERYSENSE_* configuration")?;
    logging::init_logging(&config.logging);

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => {
            debug!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let store = onboarding::VisitStore::new(&config.state_file);
    debug!(path = %store.path().display(), "visit state file");
    if !matches!(cli.command, Commands::Welcome) && !cli.json && store.first_visit() {
        print_tour(onboarding::WelcomeTour::new(fixtures::welcome_features(), true));
        println!();
    }

    let series = DashboardSeries::generate(&mut rng, synth::today(), synth::current_month_index());
    let now = Utc::now();

    match cli.command {
        Commands::Spend { timeframe } => {
            let window = series.spend_window(timeframe);
            if cli.json {
                return print_json(window);
            }
            let summary = report::summarize_spend(window);
            for point in window {
                let marker = if point.spend > point.budget { " over budget" } else { "" };
                println!("{}  ${:>4}{}", point.date, point.spend, marker);
            }
            println!(
                "Total {} / avg {} / {} days over the ${} budget",
                report::format_money(summary.total as f64),
                report::format_money(summary.average),
                summary.days_over_budget,
                synth::DAILY_BUDGET
            );
        }
        Commands::Heatmap => {
            if cli.json {
                return print_json(&series.heatmap);
            }
            let heatmap = &series.heatmap;
            print!("     ");
            for hour in 0..heatmap.x_labels.len() {
                print!("{hour:>4}");
            }
            println!();
            for (day, row) in heatmap.y_labels.iter().zip(&heatmap.data) {
                print!("{day:<5}");
                for value in row {
                    print!("{value:>4}");
                }
                println!();
            }
        }
        Commands::Forecast => {
            if cli.json {
                return print_json(&series.monthly_spend);
            }
            for point in &series.monthly_spend {
                match (point.spend, point.forecast) {
                    (Some(spend), _) => println!("{}  actual   ${spend}", point.month),
                    (None, Some(forecast)) => println!("{}  forecast ${forecast}", point.month),
                    (None, None) => println!("{}  -", point.month),
                }
            }
        }
        Commands::Performance { week } => {
            let points = if week {
                series.performance_week()
            } else {
                &series.query_performance[..]
            };
            if cli.json {
                return print_json(points);
            }
            for point in points {
                println!(
                    "{}  {:>3}s  {:>4} GB",
                    point.date, point.execution_time, point.data_scanned
                );
            }
        }
        Commands::Fixtures { catalog } => match catalog {
            Catalog::Projects => print_json(&fixtures::project_spend())?,
            Catalog::Departments => print_json(&fixtures::department_roi())?,
            Catalog::RoiDistribution => print_json(&fixtures::roi_distribution())?,
            Catalog::Opportunities => print_json(&fixtures::optimization_opportunities())?,
            Catalog::LowRoi => print_json(&fixtures::low_roi_queries())?,
            Catalog::TopQueries => print_json(&fixtures::top_queries())?,
            Catalog::Suggestions => print_json(&fixtures::SUGGESTED_QUESTIONS)?,
            Catalog::Transcript => print_json(&fixtures::initial_chat_history())?,
        },
        Commands::Ask { question } => {
            let question = question.join(" ");
            let mut session = chat::ChatSession::with_history(Vec::new(), config.reply_delay);
            let reply = session.ask(&question).await?;
            if cli.json {
                return print_json(session.history());
            }
            println!("{}", reply.message);
        }
        Commands::Chat => run_chat(config.reply_delay).await?,
        Commands::Notifications { read, read_all } => {
            let mut center = notifications::NotificationCenter::new(fixtures::notifications(now));
            if read_all {
                center.mark_all_read();
            }
            for id in read {
                center.mark_read(id)?;
            }

            if cli.json {
                return print_json(&center.iter().collect::<Vec<_>>());
            }
            println!("{} unread", center.unread_count());
            for note in center.iter() {
                println!(
                    "{} [{:?}/{}] {} ({})\n    {}",
                    if note.read { " " } else { "*" },
                    note.kind,
                    note.priority.label(),
                    note.title,
                    notifications::format_relative_time(note.timestamp, now),
                    note.message
                );
            }
        }
        Commands::Welcome => {
            if cli.json {
                return print_json(&fixtures::welcome_features());
            }
            store.first_visit();
            run_tour(onboarding::WelcomeTour::new(fixtures::welcome_features(), true)).await?;
        }
        Commands::Report { timeframe, out } => {
            let notifications = fixtures::notifications(now);
            let report = report::build_report(
                timeframe,
                series.spend_window(timeframe),
                &notifications,
                now,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            series: kind,
            timeframe,
            out,
        } => {
            let rows = export::export_to_path(&out, &series, kind, timeframe)?;
            println!("Wrote {rows} rows to {}.", out.display());
        }
    }

    Ok(())
}
