use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod config;
mod dashboard;
mod db;
mod intensity;
mod models;
mod preference;
mod progress;
mod store;
mod tables;
mod treatment;

use config::Settings;
use db::PgTreatmentStore;
use models::{HairColor, Preference, SkinTone};

#[derive(Parser)]
#[command(name = "ipl-tracker")]
#[command(about = "IPL hair-removal treatment planner and progress tracker", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a demo user with preferences and sessions
    Seed,
    /// Import treatment sessions from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Record a new skin tone / hair color preference for a user
    SetPreference {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        skin_tone: String,
        #[arg(long)]
        hair_color: String,
    },
    /// Show the treatment plan and intensity advice for a classification
    Plan {
        #[arg(long)]
        skin_tone: String,
        #[arg(long)]
        hair_color: String,
        #[arg(long)]
        json: bool,
    },
    /// Show status and the weekly progress curve for a user
    Progress {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report for a user
    Report {
        #[arg(long)]
        user: Uuid,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn parse_skin_tone(code: &str) -> anyhow::Result<SkinTone> {
    SkinTone::from_code(code).with_context(|| {
        let known: Vec<&str> = SkinTone::ALL.iter().map(|tone| tone.code()).collect();
        format!("unknown skin tone '{}', expected one of: {}", code, known.join(", "))
    })
}

fn parse_hair_color(code: &str) -> anyhow::Result<HairColor> {
    HairColor::from_code(code).with_context(|| {
        let known: Vec<&str> = HairColor::ALL.iter().map(|color| color.code()).collect();
        format!("unknown hair color '{}', expected one of: {}", code, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings;

    match cli.command {
        Commands::InitDb => {
            let store = PgTreatmentStore::connect(&settings).await?;
            store.init_db().await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let store = PgTreatmentStore::connect(&settings).await?;
            let user_id = store.seed().await?;
            println!("Seed data inserted for user {user_id}.");
        }
        Commands::Import { csv } => {
            let store = PgTreatmentStore::connect(&settings).await?;
            let inserted = store.import_csv(&csv).await?;
            tracing::info!(inserted, path = %csv.display(), "imported sessions");
            println!("Inserted {inserted} sessions from {}.", csv.display());
        }
        Commands::SetPreference {
            user,
            skin_tone,
            hair_color,
        } => {
            let skin_tone = parse_skin_tone(&skin_tone)?;
            let hair_color = parse_hair_color(&hair_color)?;
            let store = PgTreatmentStore::connect(&settings).await?;
            store.save_preference(user, skin_tone, hair_color).await?;
            println!(
                "Preference saved: {} skin, {} hair.",
                skin_tone.display_name(),
                hair_color.display_name()
            );
        }
        Commands::Plan {
            skin_tone,
            hair_color,
            json,
        } => {
            let preference = Preference {
                skin_tone: SkinTone::from_code(&skin_tone),
                hair_color: HairColor::from_code(&hair_color),
            };
            if preference.skin_tone.is_none() || preference.hair_color.is_none() {
                tracing::warn!(%skin_tone, %hair_color, "unrecognised category, using fallback buckets");
            }
            let plan = dashboard::PlanView::new(preference);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                let mut output = String::new();
                dashboard::write_plan(&mut output, &plan);
                print!("{output}");
            }
        }
        Commands::Progress { user, json } => {
            let store = PgTreatmentStore::connect(&settings).await?;
            let view = dashboard::load(&store, user, settings.week_grouping).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!(
                "{} of {} sessions completed, {:.1}% reduction, {} remaining.",
                view.status.completed_sessions,
                view.calculation.sessions,
                view.status.total_progress,
                view.status.remaining_sessions
            );
            for point in view.weekly_progress.iter() {
                println!("- {}: {}%", point.label, point.progress);
            }
        }
        Commands::Report { user, out } => {
            let store = PgTreatmentStore::connect(&settings).await?;
            let view = dashboard::load(&store, user, settings.week_grouping).await;
            let report = dashboard::build_report(&view);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
