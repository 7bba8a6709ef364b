// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `tickrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tickrun",
    version,
    about = "Track task tickets and hand their execution to a detached code agent.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Tickrun.toml` in the current working directory. A missing
    /// file is not an error; built-in defaults are used instead.
    #[arg(long, value_name = "PATH", default_value = "Tickrun.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TICKRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print results as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by `tickrun`.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new ticket.
    Create {
        /// Title of the ticket.
        #[arg(long)]
        title: String,

        /// Description of the ticket.
        #[arg(long)]
        description: String,

        /// Execution plan for the ticket.
        #[arg(long = "plan")]
        execution_plan: String,
    },

    /// List all tickets.
    List,

    /// Show a ticket by its id.
    Show { id: String },

    /// Update title, description, or execution plan of an existing ticket.
    Update {
        id: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New description.
        #[arg(long)]
        description: Option<String>,

        /// New execution plan.
        #[arg(long = "plan")]
        execution_plan: Option<String>,
    },

    /// Delete a ticket by its id.
    Delete { id: String },

    /// Build the agent prompt from a ticket and launch a detached worker
    /// for it. The ticket id doubles as the task id for later monitoring.
    Execute { id: String },

    /// Launch an arbitrary command line as a detached tracked task.
    Run {
        /// Task identifier, unique per execution attempt.
        task_id: String,

        /// Command and arguments to run (no shell is involved).
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Report liveness and current output of a previously launched task.
    Monitor { task_id: String },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
