// src/handlers.rs

//! Per-subcommand handlers.
//!
//! Handlers return a structured [`Outcome`]; turning that into text (or
//! JSON) happens only at the dispatch boundary in [`crate::run`], so no
//! raw error ever crosses it as a panic.

use anyhow::anyhow;
use serde::Serialize;
use tracing::info;

use crate::config::AgentSettings;
use crate::errors::Result;
use crate::exec::{Launcher, Monitor, MonitorResult};
use crate::prompt::{agent_argv, execution_prompt};
use crate::store::{Ticket, TicketStatus, TicketStore, TicketUpdate};

/// A ticket together with its id, as listed or shown to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TicketRecord {
    pub id: String,
    pub data: Ticket,
}

/// Structured result of one subcommand.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    TicketCreated { id: String },
    Tickets { tickets: Vec<TicketRecord> },
    Ticket(TicketRecord),
    TicketNotFound { id: String },
    TicketUpdated { id: String },
    TicketDeleted { id: String },
    Launched { task_id: String, pid: u32 },
    Monitored {
        task_id: String,
        #[serde(flatten)]
        status: MonitorResult,
    },
}

impl Outcome {
    /// Render the outcome as a human-readable message.
    pub fn render(&self) -> Result<String> {
        Ok(match self {
            Outcome::TicketCreated { id } => format!("Ticket created with ID: {id}"),
            Outcome::Tickets { tickets } => serde_json::to_string_pretty(tickets)?,
            Outcome::Ticket(record) => serde_json::to_string_pretty(record)?,
            Outcome::TicketNotFound { id } => format!("Ticket with ID {id} not found."),
            Outcome::TicketUpdated { id } => format!("Ticket with ID {id} updated."),
            Outcome::TicketDeleted { id } => format!("Ticket with ID {id} deleted."),
            Outcome::Launched { task_id, pid } => {
                format!("Worker launched for task {task_id} with PID {pid}.")
            }
            Outcome::Monitored { task_id, status } => match status {
                MonitorResult::NotFound => {
                    format!("Error: No process found with ID \"{task_id}\".")
                }
                MonitorResult::InvalidHandle => {
                    format!("Error: Invalid or missing PID for task \"{task_id}\".")
                }
                MonitorResult::OutputMissing { pid } => {
                    format!("The process {pid} is running, but its output file is missing.")
                }
                MonitorResult::Running { pid, output } => {
                    format!("Process with PID {pid} is still running.\n\nCurrent output:\n{output}")
                }
                MonitorResult::Finished { pid, output } => {
                    format!(
                        "Process with PID {pid} has already finished.\n\nFinal output:\n{output}"
                    )
                }
            },
        })
    }
}

pub async fn create_ticket(
    tickets: &TicketStore,
    title: String,
    description: String,
    execution_plan: String,
) -> Result<Outcome> {
    let id = tickets.create(title, description, execution_plan).await?;
    info!(id, "ticket created");
    Ok(Outcome::TicketCreated { id })
}

pub async fn list_tickets(tickets: &TicketStore) -> Result<Outcome> {
    let tickets = tickets
        .list()
        .await?
        .into_iter()
        .map(|(id, data)| TicketRecord { id, data })
        .collect();
    Ok(Outcome::Tickets { tickets })
}

pub async fn show_ticket(tickets: &TicketStore, id: String) -> Result<Outcome> {
    match tickets.get(&id).await? {
        Some(data) => Ok(Outcome::Ticket(TicketRecord { id, data })),
        None => Ok(Outcome::TicketNotFound { id }),
    }
}

pub async fn update_ticket(
    tickets: &TicketStore,
    id: String,
    update: TicketUpdate,
) -> Result<Outcome> {
    if tickets.update(&id, update).await? {
        Ok(Outcome::TicketUpdated { id })
    } else {
        Ok(Outcome::TicketNotFound { id })
    }
}

pub async fn delete_ticket(tickets: &TicketStore, id: String) -> Result<Outcome> {
    if tickets.delete(&id).await? {
        Ok(Outcome::TicketDeleted { id })
    } else {
        Ok(Outcome::TicketNotFound { id })
    }
}

/// Build the agent prompt from a ticket and launch its worker.
///
/// The ticket id doubles as the task id, so `monitor <ticket-id>` later
/// finds both the handle and the sink. The pending → running status flip
/// happens here, after a successful launch, not inside the launcher.
pub async fn execute_ticket(
    tickets: &TicketStore,
    launcher: &Launcher,
    agent: &AgentSettings,
    id: String,
) -> Result<Outcome> {
    let Some(ticket) = tickets.get(&id).await? else {
        return Ok(Outcome::TicketNotFound { id });
    };

    let prompt = execution_prompt(&ticket.description, &ticket.execution_plan);
    let argv = agent_argv(agent, &prompt);
    let command_line = shlex::try_join(argv.iter().map(String::as_str))
        .map_err(|e| anyhow!("agent command is not representable: {e}"))?;

    let handle = launcher.launch(&id, &command_line).await?;

    tickets
        .update(
            &id,
            TicketUpdate {
                status: Some(TicketStatus::Running),
                ..Default::default()
            },
        )
        .await?;

    Ok(Outcome::Launched {
        task_id: handle.id,
        pid: handle.pid,
    })
}

/// Launch an arbitrary command line under a caller-supplied task id.
pub async fn run_task(
    launcher: &Launcher,
    task_id: String,
    command: &[String],
) -> Result<Outcome> {
    let command_line = shlex::try_join(command.iter().map(String::as_str))
        .map_err(|e| anyhow!("command is not representable: {e}"))?;
    let handle = launcher.launch(&task_id, &command_line).await?;
    Ok(Outcome::Launched {
        task_id: handle.id,
        pid: handle.pid,
    })
}

pub async fn monitor_task(monitor: &Monitor, task_id: String) -> Result<Outcome> {
    let status = monitor.monitor(&task_id).await?;
    Ok(Outcome::Monitored { task_id, status })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_rendering_matches_reporting_contract() {
        let running = Outcome::Monitored {
            task_id: "t1".into(),
            status: MonitorResult::Running {
                pid: 7,
                output: "hello\n".into(),
            },
        };
        assert_eq!(
            running.render().unwrap(),
            "Process with PID 7 is still running.\n\nCurrent output:\nhello\n"
        );

        let finished = Outcome::Monitored {
            task_id: "t1".into(),
            status: MonitorResult::Finished {
                pid: 7,
                output: "done\n".into(),
            },
        };
        assert_eq!(
            finished.render().unwrap(),
            "Process with PID 7 has already finished.\n\nFinal output:\ndone\n"
        );

        let missing = Outcome::Monitored {
            task_id: "t1".into(),
            status: MonitorResult::OutputMissing { pid: 7 },
        };
        assert_eq!(
            missing.render().unwrap(),
            "The process 7 is running, but its output file is missing."
        );

        let not_found = Outcome::Monitored {
            task_id: "missing-id".into(),
            status: MonitorResult::NotFound,
        };
        assert_eq!(
            not_found.render().unwrap(),
            "Error: No process found with ID \"missing-id\"."
        );
    }

    #[test]
    fn outcome_serializes_with_result_tag() {
        let outcome = Outcome::Launched {
            task_id: "t1".into(),
            pid: 9,
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["result"], "launched");
        assert_eq!(json["task_id"], "t1");
        assert_eq!(json["pid"], 9);
    }

    #[test]
    fn monitored_outcome_flattens_status() {
        let outcome = Outcome::Monitored {
            task_id: "t1".into(),
            status: MonitorResult::Finished {
                pid: 9,
                output: "x".into(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["result"], "monitored");
        assert_eq!(json["status"], "finished");
        assert_eq!(json["pid"], 9);
    }
}
