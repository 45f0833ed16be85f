use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use clickfix_core::{BookingCategory, Job, JobStatus, Worker, ALL_CATEGORIES, TIMELINE_STEPS};
use clickfix_seed::marketplace_from_config;
use clickfix_store::{LedgerEvent, Marketplace, MarketplaceConfig, TransitionPolicy};
use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "clickfix")]
#[command(about = "ClickFix marketplace command-line interface")]
struct Cli {
    /// Seed file (YAML or JSON). Overrides CLICKFIX_SEED_PATH.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    /// Accept any status change instead of enforcing the job lifecycle.
    #[arg(long, global = true)]
    lenient: bool,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search workers by name/category text and category filter.
    Workers {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// Show one worker profile with reviews.
    Worker { id: String },
    /// Book a worker at their hourly rate.
    Book {
        #[arg(long, default_value = "c1")]
        customer: String,
        #[arg(long)]
        worker: String,
        #[arg(long)]
        description: String,
        #[arg(long = "media")]
        media: Vec<String>,
    },
    /// List a customer's bookings under one tab.
    Bookings {
        #[arg(long, default_value = "c1")]
        customer: String,
        #[arg(long, default_value = "Ongoing")]
        tab: String,
    },
    /// Pending requests and totals for a worker.
    Dashboard {
        #[arg(long, default_value = "1")]
        worker: String,
    },
    /// Walk a booking from request to completion.
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = MarketplaceConfig::from_env();
    if cli.seed.is_some() {
        config.seed_path = cli.seed.clone();
    }
    if cli.lenient {
        config.transition_policy = TransitionPolicy::Lenient;
    }
    let mut market = marketplace_from_config(&config)?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Workers { query, category } => {
            let found = market.catalog().search(&query, &category);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("categories: {}", market.catalog().categories().join(", "));
                for worker in found {
                    print_worker_line(worker, &config.currency);
                }
            }
        }
        Commands::Worker { id } => {
            let Some(worker) = market.catalog().find_by_id(&id) else {
                bail!("worker not found: {id}");
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(worker)?);
            } else {
                print_worker_line(worker, &config.currency);
                println!("  {} | {}", worker.location, worker.about);
                for review in &worker.reviews {
                    println!("  [{}/5] {}: {}", review.rating, review.user, review.text);
                }
            }
        }
        Commands::Book {
            customer,
            worker,
            description,
            media,
        } => {
            let job = market
                .book(&customer, &worker, &description, media)
                .context("booking failed")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                println!("booking confirmed:");
                print_job_line(&job, &config.currency);
            }
        }
        Commands::Bookings { customer, tab } => {
            let Some(category) = BookingCategory::parse(&tab) else {
                bail!("unknown bookings tab {tab:?}; expected Ongoing, Upcoming, Completed or Cancelled");
            };
            let jobs = market.ledger().list_by_customer_and_category(&customer, category);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&jobs)?);
            } else {
                println!("{category} bookings for {customer}: {}", jobs.len());
                for job in jobs {
                    print_job_line(job, &config.currency);
                    println!("    timeline: {}", TIMELINE_STEPS[job.timeline_step()]);
                }
            }
        }
        Commands::Dashboard { worker } => {
            let dashboard = market.ledger().dashboard(&worker);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                println!(
                    "worker {worker}: earnings={} {} completed={} pending={}",
                    dashboard.earnings,
                    config.currency,
                    dashboard.completed_count,
                    dashboard.pending.len()
                );
                for job in &dashboard.pending {
                    print_job_line(job, &config.currency);
                }
            }
        }
        Commands::Demo => run_demo(market, &config.currency).await?,
    }

    Ok(())
}

async fn run_demo(mut market: Marketplace, currency: &str) -> Result<()> {
    let worker_id = "1";
    let mut events = market.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LedgerEvent::JobCreated(job)) if job.worker_id == worker_id => {
                    info!(job_id = %job.id, "new job request for worker {worker_id}");
                }
                Ok(LedgerEvent::StatusChanged { job_id, from, to, .. }) => {
                    info!(%job_id, %from, %to, "job status changed");
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "event watcher lagged behind ledger");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let before = market.ledger().dashboard(worker_id);
    println!(
        "before: earnings={} {currency} completed={}",
        before.earnings, before.completed_count
    );

    let job = market.book("c1", worker_id, "Leaking pipe", Vec::new())?;
    print_job_line(&job, currency);
    for status in [JobStatus::Accepted, JobStatus::Completed] {
        let job = market.update_status(&job.id, status)?;
        print_job_line(&job, currency);
    }

    let after = market.ledger().dashboard(worker_id);
    println!(
        "after: earnings={} {currency} completed={}",
        after.earnings, after.completed_count
    );

    // Dropping the marketplace closes the event channel and ends the watcher.
    drop(market);
    watcher.await.context("event watcher task")?;
    Ok(())
}

fn print_worker_line(worker: &Worker, currency: &str) {
    println!(
        "{:>3}  {:<16} {:<12} {:.1}*  {} {currency}/h",
        worker.id,
        worker.name.trim(),
        worker.category,
        worker.rating,
        worker.hourly_rate
    );
}

fn print_job_line(job: &Job, currency: &str) {
    println!(
        "  {}  {} - {} {currency}  [{}]  {}  {}",
        job.id,
        job.service,
        job.price,
        job.status,
        job.worker_name.trim(),
        job.created_at.format("%Y-%m-%d %H:%M")
    );
}
