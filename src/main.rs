use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use clinic_compliance::aggregate::{self, FilterMode};
use clinic_compliance::clock::SystemClock;
use clinic_compliance::config::AppConfig;
use clinic_compliance::db::{Persistence, SqliteStore};
use clinic_compliance::models::*;
use clinic_compliance::store::{Action, Dispatch, EmployeeStore};
use clinic_compliance::{api, checklist};

#[derive(Parser)]
#[command(name = "clinic-hr")]
#[command(about = "Onboarding compliance checklists for clinic staff")]
struct Cli {
    /// Database file (overrides CLINIC_HR_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local API server
    Serve {
        /// Port for HTTP API (overrides CLINIC_HR_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Add an employee and generate their checklist
    Add {
        #[arg(long)]
        name: String,
        /// Hire date, YYYY-MM-DD
        #[arg(long)]
        start_date: NaiveDate,
        /// fulltime or parttime
        #[arg(long = "type", default_value = "fulltime")]
        employment_type: String,
        /// doctor, nurse, psychologist, therapist or other
        #[arg(long)]
        role: String,
        /// Job title, required when role is "other"
        #[arg(long)]
        note: Option<String>,
    },
    /// List employees
    List {
        /// all, at_risk or part_time
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Show one employee with their checklist
    Show { id: Uuid },
    /// Mark a checklist task done, or reopen it
    Toggle { id: Uuid, task: String },
    /// Delete an employee
    Remove { id: Uuid },
    /// Mark an employee as resigned
    Resign { id: Uuid },
    /// Mark a resigned employee as active again
    Reinstate { id: Uuid },
    /// Dashboard counters
    Stats,
    /// Pending critical tasks across all employees
    Feed,
    /// Employment types and roles accepted by `add`
    Options,
    /// Preview the checklist for a type and role
    Checklist {
        #[arg(long = "type", default_value = "fulltime")]
        employment_type: String,
        #[arg(long)]
        role: String,
    },
}

/// Initialize tracing with output to stderr (for CLI commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "clinic_compliance=info,tower_http=debug".into()),
    );

    if use_stderr {
        // Keep stdout clean for JSON output
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(config: &AppConfig) -> anyhow::Result<EmployeeStore> {
    let sqlite = match &config.db_path {
        Some(path) => SqliteStore::open(path.clone())
            .with_context(|| format!("Failed to open database at {}", path.display()))?,
        None => SqliteStore::open_default()?,
    };
    sqlite.migrate()?;

    Ok(EmployeeStore::open(Persistence::new(sqlite), SystemClock))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_employment_type(s: &str) -> anyhow::Result<EmploymentType> {
    EmploymentType::from_str(s).ok_or_else(|| anyhow!("Unknown employment type: {}", s))
}

fn parse_role(id: &str, note: Option<&str>) -> anyhow::Result<Role> {
    Role::from_parts(id, note).ok_or_else(|| anyhow!("Unknown role: {}", id))
}

fn require_persisted(dispatch: Dispatch) -> anyhow::Result<()> {
    if !dispatch.persisted {
        bail!("Change applied but could not be saved to the database");
    }
    Ok(())
}

fn require_employee(store: &EmployeeStore, id: Uuid) -> anyhow::Result<&Employee> {
    aggregate::find(store.snapshot(), id).ok_or_else(|| anyhow!("Employee not found: {}", id))
}

fn print_employee(store: &EmployeeStore, id: Uuid) -> anyhow::Result<()> {
    let employee = require_employee(store, id)?.clone();
    print_json(&EmployeeView::from(employee))
}

fn set_status(config: &AppConfig, id: Uuid, status: EmployeeStatus) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    require_employee(&store, id)?;
    let dispatch = store.dispatch(Action::SetStatus {
        employee_id: id,
        status,
    });
    require_persisted(dispatch)?;
    print_employee(&store, id)
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let port = config.port();
    tracing::info!("Starting clinic-hr server on port {}", port);

    let store = open_store(&config)?;
    let app = api::create_router_with_config(store, &config);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("clinic-hr server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let config = AppConfig::from_env().with_db_path(cli.db);

    let Some(command) = cli.command else {
        return serve(config).await;
    };

    match command {
        Commands::Serve { port } => serve(config.with_port(port)).await?,
        Commands::Add {
            name,
            start_date,
            employment_type,
            role,
            note,
        } => {
            let input = CreateEmployeeInput {
                name,
                start_date,
                employment_type: parse_employment_type(&employment_type)?,
                role: parse_role(&role, note.as_deref())?,
            };
            input.validate()?;

            let mut store = open_store(&config)?;
            let dispatch = store.dispatch(Action::Add(input));
            require_persisted(dispatch)?;
            let id = dispatch
                .created
                .ok_or_else(|| anyhow!("Employee was not created"))?;
            print_employee(&store, id)?;
        }
        Commands::List { filter } => {
            let mode = FilterMode::from_str(&filter)
                .ok_or_else(|| anyhow!("Unknown filter: {}", filter))?;
            let store = open_store(&config)?;
            print_json(&aggregate::summaries(store.snapshot(), mode))?;
        }
        Commands::Show { id } => {
            let store = open_store(&config)?;
            print_employee(&store, id)?;
        }
        Commands::Toggle { id, task } => {
            let mut store = open_store(&config)?;
            if require_employee(&store, id)?.task(&task).is_none() {
                bail!("Task not found: {}", task);
            }
            let dispatch = store.dispatch(Action::ToggleTask {
                employee_id: id,
                task_id: task,
            });
            require_persisted(dispatch)?;
            print_employee(&store, id)?;
        }
        Commands::Remove { id } => {
            let mut store = open_store(&config)?;
            let dispatch = store.dispatch(Action::Remove(id));
            require_persisted(dispatch)?;
        }
        Commands::Resign { id } => set_status(&config, id, EmployeeStatus::Resigned)?,
        Commands::Reinstate { id } => set_status(&config, id, EmployeeStatus::Active)?,
        Commands::Stats => {
            let store = open_store(&config)?;
            print_json(&aggregate::stats(store.snapshot()))?;
        }
        Commands::Feed => {
            let store = open_store(&config)?;
            print_json(&aggregate::feed_entries(store.snapshot()))?;
        }
        Commands::Options => print_json(&FormOptions::get())?,
        Commands::Checklist {
            employment_type,
            role,
        } => {
            let employment_type = parse_employment_type(&employment_type)?;
            let role = parse_role(&role, None)?;
            print_json(&checklist::generate(employment_type, &role))?;
        }
    }

    Ok(())
}
