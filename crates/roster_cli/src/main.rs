//! Command-line front end for the student roster.
//!
//! # Responsibility
//! - Parse arguments and resolve the database and log locations.
//! - Hand an explicit `RosterContext` to the selected command handler.

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::RosterContext;
use roster_core::{default_log_level, init_logging, StudentForm};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "students.db";

/// Student roster: add, update, delete, search and list student records.
#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "ROSTER_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "ROSTER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new student.
    Add(FormArgs),
    /// Replace every field of an existing student, keyed by id.
    Update(FormArgs),
    /// Delete a student by id.
    Delete {
        /// Student id.
        #[arg(long)]
        id: String,
    },
    /// Show one student, or everyone when the id is unknown.
    Search {
        /// Student id.
        id: String,
    },
    /// Show every student.
    List {
        /// Emit stored values as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Raw form fields; validation happens in core, not in clap.
#[derive(Args)]
struct FormArgs {
    /// Unique integer id.
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    /// Ten digit contact number.
    #[arg(long)]
    contact: String,
    #[arg(long)]
    email: String,
    /// Age between 10 and 100.
    #[arg(long)]
    age: String,
    #[arg(long)]
    course: String,
}

impl From<FormArgs> for StudentForm {
    fn from(args: FormArgs) -> Self {
        Self {
            id: args.id,
            name: args.name,
            contact: args.contact,
            email: args.email,
            age: args.age,
            course: args.course,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(effective_log_level(cli.log_level.as_deref()), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let db_path = resolve_db_path(cli.db);
    let stdout = io::stdout();
    let mut ctx = match RosterContext::open(db_path, stdout.lock()) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Add(form) => ctx.add(&form.into()),
        Commands::Update(form) => ctx.update(&form.into()),
        Commands::Delete { id } => ctx.delete(&id),
        Commands::Search { id } => ctx.search(&id),
        Commands::List { json } => ctx.list(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.already_reported() {
                eprintln!("Error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn effective_log_level(flag: Option<&str>) -> &str {
    flag.unwrap_or(default_log_level())
}

/// Flag or `ROSTER_DB_PATH`, trimmed; blank values fall back to the default file.
fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    let trimmed = flag.and_then(|path| {
        let text = path.to_str().map(|text| text.trim().to_string());
        match text {
            Some(text) if text.is_empty() => None,
            Some(text) => Some(PathBuf::from(text)),
            None => Some(path),
        }
    });
    trimmed.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}
