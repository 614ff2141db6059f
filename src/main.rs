use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;

mod aggregate;
mod classify;
mod dashboard;
mod db;
mod evidence;
mod member;
mod models;
mod report;
mod taxonomy;
mod window;

use window::TimeRange;

#[derive(Parser)]
#[command(name = "capitol-pulse")]
#[command(about = "Words-vs-actions tracker for congressional attention and action", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImportKind {
    Statements,
    Bills,
    Votes,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import classified records from a CSV file
    Import {
        #[arg(long, value_enum)]
        kind: ImportKind,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Aggregate one topic across the legislature
    Topic {
        #[arg(long)]
        topic: String,
        #[arg(long, value_enum, default_value = "30d")]
        range: TimeRange,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Words-vs-actions overview for one member
    Member {
        #[arg(long)]
        member: String,
        #[arg(long, value_enum, default_value = "30d")]
        range: TimeRange,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Rank the largest gaps across all members
    Dashboard {
        #[arg(long, value_enum, default_value = "30d")]
        range: TimeRange,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
}

fn emit(rendered: String, out: Option<PathBuf>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Report written to {}.", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { kind, csv } => {
            let inserted = match kind {
                ImportKind::Statements => db::import_statements_csv(&pool, &csv).await?,
                ImportKind::Bills => db::import_bills_csv(&pool, &csv).await?,
                ImportKind::Votes => db::import_votes_csv(&pool, &csv).await?,
            };
            println!("Inserted {inserted} records from {}.", csv.display());
        }
        Commands::Topic {
            topic,
            range,
            json,
            out,
        } => {
            if taxonomy::topic_by_id(&topic).is_none() {
                let known: Vec<&str> = taxonomy::TAXONOMY.iter().map(|t| t.id).collect();
                anyhow::bail!("unknown topic {topic}; known topics: {}", known.join(", "));
            }

            let win = window::resolve(range, Utc::now().date_naive());
            let statements = db::fetch_statements(&pool, win.from).await?;
            let bills = db::fetch_bills(&pool, win.from).await?;
            let votes = db::fetch_votes(&pool, win.from).await?;
            let members = db::fetch_members(&pool).await?;

            let agg =
                aggregate::aggregate_topic(&statements, &bills, &votes, &members, &topic, win);
            let rendered = if json {
                serde_json::to_string_pretty(&agg)?
            } else {
                report::build_topic_report(&agg)
            };
            emit(rendered, out)?;
        }
        Commands::Member {
            member,
            range,
            json,
            out,
        } => {
            let members = db::fetch_members(&pool).await?;
            let target = members
                .iter()
                .find(|m| m.bioguide_id == member)
                .with_context(|| format!("no member with bioguide id {member}"))?;

            let win = window::resolve(range, Utc::now().date_naive());
            let statements = db::fetch_statements(&pool, win.from).await?;
            let bills = db::fetch_bills(&pool, win.from).await?;
            let votes = db::fetch_votes(&pool, win.from).await?;

            let overview = member::aggregate_member(target, &statements, &bills, &votes, win);
            let rendered = if json {
                serde_json::to_string_pretty(&overview)?
            } else {
                report::build_member_report(target, &overview)
            };
            emit(rendered, out)?;
        }
        Commands::Dashboard { range, limit, json } => {
            let win = window::resolve(range, Utc::now().date_naive());
            let statements = db::fetch_statements(&pool, win.from).await?;
            let bills = db::fetch_bills(&pool, win.from).await?;
            let votes = db::fetch_votes(&pool, win.from).await?;
            let members = db::fetch_members(&pool).await?;

            let overviews: Vec<models::MemberOverview> = members
                .iter()
                .map(|m| member::aggregate_member(m, &statements, &bills, &votes, win))
                .collect();

            let mut gap_report = dashboard::rank_gaps(&overviews, win);
            gap_report.entries.truncate(limit);

            let rendered = if json {
                serde_json::to_string_pretty(&gap_report)?
            } else {
                report::build_dashboard_report(&gap_report)
            };
            print!("{rendered}");
        }
    }

    Ok(())
}
