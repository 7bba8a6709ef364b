// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod handlers;
pub mod logging;
pub mod prompt;
pub mod store;

use std::path::Path;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_or_default;
use crate::errors::Result;
use crate::exec::{Launcher, Monitor};
use crate::store::{JsonStore, ProcessRegistry, TicketStore, TicketUpdate};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (config file + env override)
/// - the document store (tickets + process registry)
/// - launcher / monitor
/// and dispatches the parsed subcommand to its handler, rendering the
/// structured outcome as text or JSON on stdout.
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_or_default(Path::new(&args.config))?;
    debug!(
        working_dir = %settings.working_dir.display(),
        data_dir = %settings.data_dir.display(),
        "settings resolved"
    );

    let store = JsonStore::new(settings.data_dir.clone());
    let tickets = TicketStore::new(store.clone());
    let registry = ProcessRegistry::new(store);
    let launcher = Launcher::new(settings.working_dir.clone(), registry.clone());
    let monitor = Monitor::new(settings.working_dir.clone(), registry);

    let outcome = match args.command {
        Command::Create {
            title,
            description,
            execution_plan,
        } => handlers::create_ticket(&tickets, title, description, execution_plan).await?,
        Command::List => handlers::list_tickets(&tickets).await?,
        Command::Show { id } => handlers::show_ticket(&tickets, id).await?,
        Command::Update {
            id,
            title,
            description,
            execution_plan,
        } => {
            let update = TicketUpdate {
                title,
                description,
                execution_plan,
                status: None,
            };
            handlers::update_ticket(&tickets, id, update).await?
        }
        Command::Delete { id } => handlers::delete_ticket(&tickets, id).await?,
        Command::Execute { id } => {
            handlers::execute_ticket(&tickets, &launcher, &settings.agent, id).await?
        }
        Command::Run { task_id, command } => {
            handlers::run_task(&launcher, task_id, &command).await?
        }
        Command::Monitor { task_id } => handlers::monitor_task(&monitor, task_id).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.render()?);
    }

    Ok(())
}
