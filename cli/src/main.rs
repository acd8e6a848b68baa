mod config;
mod output;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use student_roster_core::{
    NewStudent, SeedSet, parse_enrollment_date, validate_email, validate_new_student,
};
use student_roster_sqlite::{Migration, SeedReport, StudentStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::StoreConfig;
use crate::output::{OutputFormat, format_students};

#[derive(Debug, Parser)]
#[command(name = "students")]
#[command(version, about = "CRUD operations on the students table")]
struct Cli {
    /// Output format for student listings.
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,
    /// Env file with STUDENTS_DATABASE and friends. Ignored if missing.
    #[arg(long, default_value = ".env", global = true)]
    env_file: PathBuf,
    /// Skip the listing printed after add, update-email, and delete.
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Retrieve and display all students.
    GetAll,
    /// Insert a new student.
    Add(AddArgs),
    /// Update a student's email by id.
    UpdateEmail(UpdateEmailArgs),
    /// Delete a student by id.
    Delete(DeleteArgs),
    /// Create, drop, seed, or inspect the students table.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// First name.
    #[arg(long)]
    first: String,
    /// Last name.
    #[arg(long)]
    last: String,
    /// Email (must be unique).
    #[arg(long)]
    email: String,
    /// Enrollment date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateEmailArgs {
    /// Student ID.
    #[arg(long)]
    id: i64,
    /// New email.
    #[arg(long)]
    email: String,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Student ID.
    #[arg(long)]
    id: i64,
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(subcommand)]
    operation: MigrateOperation,
}

#[derive(Debug, Subcommand)]
enum MigrateOperation {
    /// Create the students table.
    Up,
    /// Drop the students table (requires STUDENTS_ALLOW_RESET).
    Down,
    /// Insert seed rows into the students table.
    Seed(SeedArgs),
    /// Drop, recreate, and reseed the table (requires STUDENTS_ALLOW_RESET).
    Refresh(SeedArgs),
    /// Show whether the table exists and how many rows it holds.
    Status,
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// JSON or YAML file with an array of students. Defaults to the built-in demo rows.
    #[arg(long)]
    source: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::GetAll => run_get_all(&cli.env_file, cli.format),
        Command::Add(args) => run_add(&cli, args),
        Command::UpdateEmail(args) => run_update_email(&cli, args),
        Command::Delete(args) => run_delete(&cli, args),
        Command::Migrate(args) => run_migrate(&cli, args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// CRUD commands
// ---------------------------------------------------------------------------

fn open_store(env_file: &Path) -> Result<StudentStore, String> {
    let config = StoreConfig::load(env_file)?;
    debug!(database = %config.database.display(), "resolved configuration");
    StudentStore::open(&config.database).map_err(|e| e.to_string())
}

fn print_students(store: &StudentStore, format: OutputFormat) -> Result<(), String> {
    let students = store.get_all().map_err(|e| e.to_string())?;
    println!("{}", format_students(&students, format)?);
    Ok(())
}

/// Reports a successful mutation, then the listing unless `--quiet`.
///
/// Structured formats keep stdout parseable, so the confirmation goes to
/// stderr there.
fn report_mutation(cli: &Cli, store: &StudentStore, confirmation: &str) -> Result<(), String> {
    match cli.format {
        OutputFormat::Table => println!("{confirmation}"),
        OutputFormat::Json | OutputFormat::Yaml => eprintln!("{confirmation}"),
    }
    if !cli.quiet {
        print_students(store, cli.format)?;
    }
    Ok(())
}

fn run_get_all(env_file: &Path, format: OutputFormat) -> Result<(), String> {
    let store = open_store(env_file)?;
    print_students(&store, format)
}

fn run_add(cli: &Cli, args: &AddArgs) -> Result<(), String> {
    let mut student = NewStudent::new(&args.first, &args.last, &args.email);
    if let Some(date) = &args.date {
        student = student.enrolled_on(parse_enrollment_date(date).map_err(|e| e.to_string())?);
    }
    if let Some(err) = validate_new_student(&student).into_iter().next() {
        return Err(err.to_string());
    }

    let store = open_store(&cli.env_file)?;
    let student_id = store.add(&student).map_err(|e| e.to_string())?;
    report_mutation(cli, &store, &format!("Inserted student_id={student_id}"))
}

fn run_update_email(cli: &Cli, args: &UpdateEmailArgs) -> Result<(), String> {
    validate_email(&args.email).map_err(|e| e.to_string())?;

    let store = open_store(&cli.env_file)?;
    store
        .update_email(args.id, &args.email)
        .map_err(|e| e.to_string())?;
    report_mutation(
        cli,
        &store,
        &format!("Updated email for student_id={}", args.id),
    )
}

fn run_delete(cli: &Cli, args: &DeleteArgs) -> Result<(), String> {
    let store = open_store(&cli.env_file)?;
    store.delete(args.id).map_err(|e| e.to_string())?;
    report_mutation(cli, &store, &format!("Deleted student_id={}", args.id))
}

// ---------------------------------------------------------------------------
// migrate command
// ---------------------------------------------------------------------------

fn run_migrate(cli: &Cli, args: &MigrateArgs) -> Result<(), String> {
    let config = StoreConfig::load(&cli.env_file)?;
    // Only `up` and `refresh` may create the database file.
    let opened = match &args.operation {
        MigrateOperation::Up | MigrateOperation::Refresh(_) => Migration::open(&config.database),
        MigrateOperation::Down | MigrateOperation::Seed(_) | MigrateOperation::Status => {
            Migration::open_existing(&config.database)
        }
    };
    let mut migration = opened
        .map_err(|e| e.to_string())?
        .allow_reset(config.allow_reset);

    match &args.operation {
        MigrateOperation::Up => {
            migration
                .up()
                .map_err(|e| format!("Migration up failed: {e}"))?;
            println!(
                "Migration up complete. Table 'students' ready in '{}'.",
                config.database.display()
            );
        }
        MigrateOperation::Down => {
            migration
                .down()
                .map_err(|e| format!("Migration down failed: {e}"))?;
            println!(
                "Migration down complete. Table 'students' dropped from '{}'.",
                config.database.display()
            );
        }
        MigrateOperation::Seed(seed_args) => {
            let seed = load_seed(seed_args)?;
            let report = migration
                .seed(&seed)
                .map_err(|e| format!("Seed failed: {e}"))?;
            print_seed_report("Seed complete:", &report);
        }
        MigrateOperation::Refresh(seed_args) => {
            let seed = load_seed(seed_args)?;
            let report = migration
                .refresh(&seed)
                .map_err(|e| format!("Refresh failed: {e}"))?;
            print_seed_report(
                "Refresh complete (table dropped, recreated, and reseeded):",
                &report,
            );
        }
        MigrateOperation::Status => {
            let status = migration
                .status()
                .map_err(|e| format!("Failed to get migration status: {e}"))?;
            println!("Migration Status:");
            println!(
                "  Table exists: {}",
                if status.table_exists { "yes" } else { "no" }
            );
            println!("  Student count: {}", status.student_count);
        }
    }
    Ok(())
}

fn load_seed(args: &SeedArgs) -> Result<SeedSet, String> {
    match &args.source {
        Some(path) => SeedSet::from_file(path)
            .map_err(|e| format!("Failed to load seed file '{}': {e}", path.display())),
        None => Ok(SeedSet::builtin()),
    }
}

fn print_seed_report(heading: &str, report: &SeedReport) {
    println!("{heading}");
    println!("  Students inserted: {}", report.students_inserted);
}
