use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{QuizSettings, SettingsError};
use services::{AppServices, QuizLoopService, StatsService, source_for_location};
use storage::QuestionSource;
use tracing::{info, warn};
use ui::{App, UiApp, WebSpeechNarrator, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_QUESTIONS: &str = "questions.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    InvalidSettings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidSettings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_count(flag: &'static str, raw: &str) -> Result<u32, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

struct Args {
    db_url: String,
    questions: String,
    settings: QuizSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--questions <path|url>] [--size <n>] [--seconds <n>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --questions {DEFAULT_QUESTIONS}");
    eprintln!("  --size {}", QuizSettings::DEFAULT_QUESTIONS_PER_SESSION);
    eprintln!("  --seconds {}", QuizSettings::DEFAULT_SECONDS_PER_QUESTION);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_QUESTIONS, QUIZ_SESSION_SIZE, QUIZ_SECONDS, QUIZ_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut questions =
            std::env::var("QUIZ_QUESTIONS").unwrap_or_else(|_| DEFAULT_QUESTIONS.into());
        let mut size = match std::env::var("QUIZ_SESSION_SIZE") {
            Ok(raw) => parse_count("QUIZ_SESSION_SIZE", &raw)?,
            Err(_) => QuizSettings::DEFAULT_QUESTIONS_PER_SESSION,
        };
        let mut seconds = match std::env::var("QUIZ_SECONDS") {
            Ok(raw) => parse_count("QUIZ_SECONDS", &raw)?,
            Err(_) => QuizSettings::DEFAULT_SECONDS_PER_QUESTION,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--questions" => {
                    questions = require_value(args, "--questions")?;
                }
                "--size" => {
                    size = parse_count("--size", &require_value(args, "--size")?)?;
                }
                "--seconds" => {
                    seconds = parse_count("--seconds", &require_value(args, "--seconds")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = QuizSettings::new(size, seconds).map_err(ArgsError::InvalidSettings)?;
        Ok(Self {
            db_url,
            questions,
            settings,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = std::env::var("QUIZ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // The database is optional: statistics stay in memory if it cannot be prepared.
    if let Err(err) = prepare_sqlite_file(&parsed.db_url) {
        warn!(db_url = %parsed.db_url, error = %err, "could not prepare statistics database file");
    }

    let source = source_for_location(&parsed.questions);
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        source.as_ref(),
        parsed.settings,
        Arc::new(WebSpeechNarrator),
    )
    .await;
    info!(
        questions = %source.describe(),
        size = parsed.settings.questions_per_session(),
        seconds = parsed.settings.seconds_per_question(),
        "launching quiz"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: services.quiz_loop(),
        stats: services.stats(),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("CBSE Maths 8 Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
