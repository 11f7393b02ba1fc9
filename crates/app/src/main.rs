//! `shelflife` -- terminal client for a ShelfLife backend.
//!
//! Configuration comes from the environment (a `.env` file is honoured):
//!
//! | Variable                         | Default                    |
//! |----------------------------------|----------------------------|
//! | `SHELFLIFE_API_BASE`             | `http://localhost:8080`    |
//! | `SHELFLIFE_REQUEST_TIMEOUT_SECS` | `30`                       |
//! | `SHELFLIFE_STORAGE_PATH`         | `.shelflife/storage.json`  |
//! | `SHELFLIFE_USE_FAKE_WORKS`       | `false`                    |
//!
//! Pages are printed to stdout; logs go to stderr (`RUST_LOG`).

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use shelflife_app::config::AppConfig;
use shelflife_app::detail::WorkDetailPage;
use shelflife_app::library::LibraryPage;
use shelflife_app::render;
use shelflife_app::reviews::ReviewsPage;
use shelflife_client::{CallContext, ShelfLifeApi, TokenStore};
use shelflife_core::review::{ReviewDraft, MAX_RATING, MIN_RATING};
use shelflife_core::session::SessionDraft;
use shelflife_core::types::{Date, DbId, Timestamp};
use shelflife_core::work::{WorkDraft, WorkStatus, WorkType};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelflife")]
#[command(about = "Track the books, movies and games you explore", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the library grouped into shelves
    Library {
        /// Only show works whose title or creator contains this text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one work with its sessions and review
    Show { work_id: DbId },
    /// Add a work to the library
    Add(WorkArgs),
    /// Change fields of an existing work
    Update {
        work_id: DbId,
        #[command(flatten)]
        fields: WorkArgs,
    },
    /// Remove a work
    Delete { work_id: DbId },
    /// Log a session for a work
    LogSession {
        work_id: DbId,
        #[command(flatten)]
        fields: SessionArgs,
    },
    /// Change fields of a logged session
    EditSession {
        work_id: DbId,
        session_id: DbId,
        #[command(flatten)]
        fields: SessionArgs,
    },
    /// Remove a logged session
    DeleteSession { session_id: DbId },
    /// Create or replace the review of a work
    Review {
        work_id: DbId,
        #[command(flatten)]
        fields: ReviewArgs,
    },
    /// Remove a review
    DeleteReview { review_id: DbId },
    /// List all of your reviews
    Reviews,
    /// Store a bearer token for later calls
    Login { token: String },
    /// Forget the stored token
    Logout,
}

#[derive(Args)]
struct WorkArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    creator: Option<String>,
    /// BOOK, MOVIE, GAME or OTHER
    #[arg(long = "type")]
    work_type: Option<WorkType>,
    #[arg(long)]
    genre: Option<String>,
    /// TO_EXPLORE, IN_PROGRESS or FINISHED
    #[arg(long)]
    status: Option<WorkStatus>,
    #[arg(long)]
    total_units: Option<i32>,
    #[arg(long)]
    cover_url: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    started_at: Option<Date>,
    /// YYYY-MM-DD
    #[arg(long)]
    finished_at: Option<Date>,
}

impl WorkArgs {
    /// Overwrite the fields given on the command line.
    fn apply_to(self, draft: &mut WorkDraft) {
        macro_rules! set {
            ($($field:ident),*) => {$(
                if let Some(value) = self.$field {
                    draft.$field = Some(value);
                }
            )*};
        }
        set!(title, creator, work_type, genre, status, total_units, cover_url, started_at, finished_at);
    }
}

#[derive(Args)]
struct SessionArgs {
    /// RFC 3339 timestamp, e.g. 2025-02-01T20:15:00Z
    #[arg(long)]
    started_at: Option<Timestamp>,
    #[arg(long)]
    ended_at: Option<Timestamp>,
    #[arg(long)]
    minutes: Option<i32>,
    #[arg(long)]
    units_completed: Option<i32>,
    #[arg(long)]
    note: Option<String>,
}

impl SessionArgs {
    fn apply_to(self, draft: &mut SessionDraft) {
        macro_rules! set {
            ($($field:ident),*) => {$(
                if let Some(value) = self.$field {
                    draft.$field = Some(value);
                }
            )*};
        }
        set!(started_at, ended_at, minutes, units_completed, note);
    }
}

#[derive(Args)]
struct ReviewArgs {
    #[arg(long, value_parser = clap::value_parser!(i32).range(MIN_RATING as i64..=MAX_RATING as i64))]
    rating: Option<i32>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    body: Option<String>,
    /// Hide the review from other users
    #[arg(long, conflicts_with = "public")]
    private: bool,
    /// Show the review to other users
    #[arg(long)]
    public: bool,
}

impl ReviewArgs {
    /// Overwrite the fields given on the command line; visibility only
    /// changes when `--private` or `--public` is passed.
    fn apply_to(self, draft: &mut ReviewDraft) {
        if let Some(rating) = self.rating {
            draft.rating = Some(rating);
        }
        if let Some(title) = self.title {
            draft.title = Some(title);
        }
        if let Some(body) = self.body {
            draft.body = Some(body);
        }
        if self.private {
            draft.is_private = Some(true);
        } else if self.public {
            draft.is_private = Some(false);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelflife_app=info,shelflife_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    let store = TokenStore::new(&config.client.storage_path);

    let command = match command {
        Command::Login { token } => {
            if token.trim().is_empty() {
                bail!("Token must not be empty");
            }
            store.save_token(&token)?;
            println!("Token stored in {}", store.path().display());
            return Ok(());
        }
        Command::Logout => {
            store.clear_token()?;
            println!("Logged out.");
            return Ok(());
        }
        other => other,
    };

    let credentials = store
        .credentials()
        .context("Could not read the stored token")?;
    let cancel = CancellationToken::new();
    let cx = CallContext::new(credentials, cancel.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling pending requests");
            cancel.cancel();
        }
    });

    let api = ShelfLifeApi::new(&config.client)?;
    tracing::debug!(api_base = api.base_url(), "Using backend");

    match command {
        Command::Library { search } => {
            let mut page = LibraryPage::new(api, cx, config.use_fake_works);
            page.mount();
            page.settled().await;
            println!("{}", render::render_library(&page.state(), &search));
        }
        Command::Show { work_id } => {
            let mut page = WorkDetailPage::new(api, cx);
            page.show(work_id);
            page.settled().await;
            println!("{}", render::render_detail(&page.state()));
        }
        Command::Reviews => {
            let mut page = ReviewsPage::new(api, cx);
            page.mount();
            page.settled().await;
            println!("{}", render::render_reviews(&page.state()));
        }
        Command::Add(fields) => {
            if fields.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
                bail!("A title is required (--title)");
            }
            let mut draft = WorkDraft::default();
            fields.apply_to(&mut draft);
            match api.create_work(&cx, &draft).await? {
                Some(work) => println!("Added {}", render::work_card(&work)),
                None => println!("Work added."),
            }
        }
        Command::Update { work_id, fields } => {
            let Some(current) = api.get_work(&cx, work_id).await? else {
                bail!("Work {work_id} not found");
            };
            let mut draft = WorkDraft::from(&current);
            fields.apply_to(&mut draft);
            match api.update_work(&cx, work_id, &draft).await? {
                Some(work) => println!("Updated {}", render::work_card(&work)),
                None => println!("Work {work_id} updated."),
            }
        }
        Command::Delete { work_id } => {
            api.delete_work(&cx, work_id).await?;
            println!("Work {work_id} deleted.");
        }
        Command::LogSession { work_id, fields } => {
            let mut draft = SessionDraft {
                work_id: Some(work_id),
                ..SessionDraft::default()
            };
            fields.apply_to(&mut draft);
            match api.create_session(&cx, work_id, &draft).await? {
                Some(session) => println!("Session #{} logged.", session.id),
                None => println!("Session logged."),
            }
        }
        Command::EditSession {
            work_id,
            session_id,
            fields,
        } => {
            let sessions = api.get_work_sessions(&cx, work_id).await?;
            let Some(current) = sessions.iter().find(|s| s.id == session_id) else {
                bail!("Session {session_id} not found for work {work_id}");
            };
            let mut draft = SessionDraft::from(current);
            draft.work_id.get_or_insert(work_id);
            fields.apply_to(&mut draft);
            api.update_session(&cx, session_id, &draft).await?;
            println!("Session #{session_id} updated.");
        }
        Command::DeleteSession { session_id } => {
            api.delete_session(&cx, session_id).await?;
            println!("Session #{session_id} deleted.");
        }
        Command::Review { work_id, fields } => {
            let mut draft = api
                .get_work_review(&cx, work_id)
                .await?
                .as_ref()
                .map(ReviewDraft::from)
                .unwrap_or_default();
            draft.work_id.get_or_insert(work_id);
            fields.apply_to(&mut draft);
            match api.upsert_review(&cx, work_id, &draft).await? {
                Some(review) => println!("Review #{} saved.", review.id),
                None => println!("Review saved."),
            }
        }
        Command::DeleteReview { review_id } => {
            api.delete_review(&cx, review_id).await?;
            println!("Review #{review_id} deleted.");
        }
        // Handled before any backend call.
        Command::Login { .. } | Command::Logout => {}
    }

    Ok(())
}
