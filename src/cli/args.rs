//! CLI argument definitions using clap derive

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use kanban_schema::{Id, Role};

#[derive(Parser)]
#[command(name = "kanban")]
#[command(author, version, about = "Command-line client for the Kanban board API")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        username: String,

        /// Password (prefer the environment variable over the flag)
        #[arg(long, env = "KANBAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Revalidate the stored session and show the current user
    Whoami,

    /// Show where navigating to PATH would land with the current session
    Route { path: String },

    /// Board management
    #[command(subcommand)]
    Boards(BoardCommands),

    /// Column management
    #[command(subcommand)]
    Columns(ColumnCommands),

    /// Ticket management
    #[command(subcommand)]
    Tickets(TicketCommands),

    /// User management (administrators only)
    #[command(subcommand)]
    Users(UserCommands),
}

#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// List boards owned by the current user
    List,

    /// Show one board with its columns and tickets
    Show { id: Id },

    /// Create a board
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a board or change its description
    Rename {
        id: Id,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a board
    Delete { id: Id },
}

#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// List the columns of a board
    List { board_id: Id },

    /// Add a column to a board
    Create {
        board_id: Id,
        name: String,
        #[arg(long)]
        color: Option<String>,
    },

    /// Update a column
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        position: Option<i64>,
    },

    /// Delete a column and its tickets
    Delete { id: Id },
}

#[derive(Subcommand, Debug)]
pub enum TicketCommands {
    /// List tickets of a board, optionally a single column
    List {
        board_id: Id,
        #[arg(long)]
        column: Option<Id>,
    },

    /// Create a ticket at the end of a column
    Create {
        board_id: Id,
        column_id: Id,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_timestamp)]
        due: Option<DateTime<Utc>>,
    },

    /// Update ticket fields
    Update {
        id: Id,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, value_parser = parse_timestamp, conflicts_with = "clear_start")]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_timestamp, conflicts_with = "clear_due")]
        due: Option<DateTime<Utc>>,
        /// Remove the start date
        #[arg(long)]
        clear_start: bool,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// Remove the description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
    },

    /// Move a ticket to another column
    Move {
        id: Id,
        column_id: Id,
        #[arg(long, allow_hyphen_values = true)]
        position: Option<i64>,
    },

    /// Delete a ticket
    Delete { id: Id },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List,

    /// Create a user
    Create {
        username: String,
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "KANBAN_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Update a user's profile or role
    Update {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<RoleArg>,
    },

    /// Delete a user
    Delete { id: Id },

    /// Set a new password for a user
    ResetPassword {
        id: Id,
        #[arg(long, env = "KANBAN_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Role::Admin,
            RoleArg::User => Role::User,
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    kanban_schema::timestamp::parse(raw)
        .ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got {raw:?}"))
}
