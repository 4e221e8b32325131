// src/main.rs

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use question_store::{
    QuestionService,
    config::Config,
    db,
    error::AppError,
    models::{FeedbackQuestion, legacy::parse_export},
    repository::{InMemoryQuestionRepository, PgQuestionRepository, QuestionRepository},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maintenance tool for the feedback question store.
#[derive(Debug, Parser)]
#[command(name = "question-store", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Copy questions exported from the previous store, keeping ids and timestamps.
    Import {
        /// JSON-lines file, one legacy question per line.
        file: PathBuf,
        /// Import into a throwaway in-memory store instead of the database.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the questions of one feedback session as JSON.
    List {
        #[arg(long)]
        course: String,
        #[arg(long)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "question-store.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging). Stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Returning lets `_guard` drop and flush the file writer before exit.
    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), AppError> {
    match command {
        Command::Migrate => {
            db::connect(config).await?;
        }
        Command::Import { file, dry_run } => {
            let questions = read_legacy_questions(&file).await?;
            tracing::info!("Read {} legacy questions from {}", questions.len(), file.display());

            let repo: Arc<dyn QuestionRepository> = if dry_run {
                Arc::new(InMemoryQuestionRepository::new())
            } else {
                Arc::new(PgQuestionRepository::new(db::connect(config).await?))
            };

            let report = QuestionService::new(repo)
                .migrate_legacy_questions(&questions)
                .await;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if !report.failed.is_empty() {
                return Err(AppError::Internal(format!(
                    "{} questions failed to import",
                    report.failed.len()
                )));
            }
        }
        Command::List { course, session } => {
            let repo = PgQuestionRepository::new(db::connect(config).await?);
            let questions = QuestionService::new(Arc::new(repo))
                .list_session_questions(&course, &session)
                .await?;
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
    }
    Ok(())
}

/// Reads a JSON-lines export from disk.
async fn read_legacy_questions(path: &Path) -> Result<Vec<FeedbackQuestion>, AppError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_export(&content)
}
