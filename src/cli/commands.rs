//! Command dispatch. Each command maps onto one store operation.

use kanban_schema::{ColumnCreate, ColumnUpdate, TicketCreate, TicketUpdate, UserCreate, UserUpdate};
use serde::Serialize;

use crate::KanbanApp;
use crate::cli::args::{
    BoardCommands, Cli, ColumnCommands, Commands, GlobalOpts, TicketCommands, UserCommands,
};
use crate::error::Outcome;
use crate::navigation::{HOME_PATH, LOGIN_PATH};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub async fn run(cli: Cli, app: &KanbanApp) -> CliResult {
    let global = cli.global;
    match cli.command {
        Commands::Login { username, password } => login(app, &global, &username, &password).await,
        Commands::Logout => {
            app.auth().logout().await;
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => whoami(app, &global).await,
        Commands::Route { path } => {
            let landed = app.navigate(&path).await;
            emit(&global, &serde_json::json!({ "requested": path, "location": landed }), || {
                println!("{landed}");
            })
        }
        Commands::Boards(cmd) => boards(app, &global, cmd).await,
        Commands::Columns(cmd) => columns(app, &global, cmd).await,
        Commands::Tickets(cmd) => tickets(app, &global, cmd).await,
        Commands::Users(cmd) => users(app, &global, cmd).await,
    }
}

fn emit<T: Serialize>(global: &GlobalOpts, value: &T, plain: impl FnOnce()) -> CliResult {
    if global.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        plain();
    }
    Ok(())
}

fn finish<T: Serialize>(global: &GlobalOpts, outcome: Outcome<T>, done: &str) -> CliResult {
    if global.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    match outcome.into_result() {
        Ok(_) => {
            if !global.json {
                println!("{done}");
            }
            Ok(())
        }
        Err(message) => Err(message.into()),
    }
}

/// Navigate to `path` and fail unless the guard lets the session in.
async fn enter(app: &KanbanApp, path: &str) -> CliResult {
    let landed = app.navigate(path).await;
    if landed == path {
        return Ok(());
    }
    if landed == LOGIN_PATH {
        Err("not logged in; run `kanban login <username>` first".into())
    } else {
        Err(format!("access to {path} denied (redirected to {landed})").into())
    }
}

async fn login(app: &KanbanApp, global: &GlobalOpts, username: &str, password: &str) -> CliResult {
    if app.navigate(LOGIN_PATH).await != LOGIN_PATH {
        let current = app.auth().current_user().await;
        let name = current.as_ref().map_or("<unknown>", |u| u.username.as_str());
        println!("Already logged in as {name}; run `kanban logout` first.");
        return Ok(());
    }
    let outcome = app.auth().login(username, password).await;
    if outcome.success {
        app.navigate(HOME_PATH).await;
    }
    finish(global, outcome, &format!("Logged in as {username}."))
}

async fn whoami(app: &KanbanApp, global: &GlobalOpts) -> CliResult {
    if !app.auth().check_auth().await {
        return Err("not logged in".into());
    }
    let user = app.auth().current_user().await;
    emit(global, &user, || match &user {
        Some(u) => println!("{} ({}) role={}", u.username, u.name, u.role),
        None => println!("<token without user>"),
    })
}

async fn boards(app: &KanbanApp, global: &GlobalOpts, cmd: BoardCommands) -> CliResult {
    enter(app, HOME_PATH).await?;
    match cmd {
        BoardCommands::List => {
            let boards = app.boards().fetch_boards().await?;
            emit(global, &boards, || {
                for b in &boards {
                    println!("{:>5}  {}", b.id, b.name);
                }
            })
        }
        BoardCommands::Show { id } => {
            enter(app, &format!("/boards/{id}")).await?;
            let detail = app.open_board(id).await?;
            let columns = app.columns().get_columns_by_board(id).await;
            let mut lanes = Vec::with_capacity(columns.len());
            for col in columns {
                let tickets = app.tickets().get_tickets_by_column(col.id).await;
                lanes.push((col, tickets));
            }
            emit(global, &detail, || {
                println!("#{} {}", detail.board.id, detail.board.name);
                if let Some(desc) = &detail.board.description {
                    println!("{desc}");
                }
                for (col, tickets) in &lanes {
                    println!("\n[{}] {} ({})", col.id, col.name, tickets.len());
                    for t in tickets {
                        println!("  {:>5}  {:<8} {}", t.id, t.priority, t.title);
                    }
                }
            })
        }
        BoardCommands::Create { name, description } => {
            let board = app.boards().create_board(&name, description).await?;
            emit(global, &board, || println!("Created board {} ({})", board.id, board.name))
        }
        BoardCommands::Rename {
            id,
            name,
            description,
        } => {
            let board = app.boards().update_board(id, &name, description).await?;
            emit(global, &board, || println!("Updated board {}", board.id))
        }
        BoardCommands::Delete { id } => {
            app.delete_board(id).await?;
            println!("Deleted board {id}");
            Ok(())
        }
    }
}

async fn columns(app: &KanbanApp, global: &GlobalOpts, cmd: ColumnCommands) -> CliResult {
    enter(app, HOME_PATH).await?;
    match cmd {
        ColumnCommands::List { board_id } => {
            app.columns().fetch_columns(board_id).await?;
            let cols = app.columns().get_columns_by_board(board_id).await;
            emit(global, &cols, || {
                for c in &cols {
                    println!("{:>5}  pos={:<3} {:<8} {}", c.id, c.position, c.color, c.name);
                }
            })
        }
        ColumnCommands::Create {
            board_id,
            name,
            color,
        } => {
            let mut new = ColumnCreate::new(board_id, name);
            if let Some(color) = color {
                new = new.with_color(color);
            }
            let col = app.columns().create_column(&new).await?;
            emit(global, &col, || println!("Created column {} ({})", col.id, col.name))
        }
        ColumnCommands::Update {
            id,
            name,
            color,
            position,
        } => {
            let updates = ColumnUpdate {
                name,
                color,
                position,
            };
            if updates.is_empty() {
                return Err("nothing to update".into());
            }
            let col = app.columns().update_column(id, &updates).await?;
            emit(global, &col, || println!("Updated column {}", col.id))
        }
        ColumnCommands::Delete { id } => {
            app.delete_column(id).await?;
            println!("Deleted column {id}");
            Ok(())
        }
    }
}

async fn tickets(app: &KanbanApp, global: &GlobalOpts, cmd: TicketCommands) -> CliResult {
    enter(app, HOME_PATH).await?;
    match cmd {
        TicketCommands::List { board_id, column } => {
            app.tickets().fetch_tickets(board_id).await?;
            let tickets = match column {
                Some(column_id) => app.tickets().get_tickets_by_column(column_id).await,
                None => app.tickets().get_tickets_by_board(board_id).await,
            };
            emit(global, &tickets, || {
                for t in &tickets {
                    println!(
                        "{:>5}  col={:<4} pos={:<3} {:<8} {}",
                        t.id, t.column_id, t.position, t.priority, t.title
                    );
                }
            })
        }
        TicketCommands::Create {
            board_id,
            column_id,
            title,
            description,
            priority,
            start,
            due,
        } => {
            let new = TicketCreate {
                description,
                priority,
                start_date: start,
                due_date: due,
                ..TicketCreate::new(board_id, column_id, title)
            };
            let ticket = app.tickets().create_ticket(&new).await?;
            emit(global, &ticket, || {
                println!("Created ticket {} at position {}", ticket.id, ticket.position);
            })
        }
        TicketCommands::Update {
            id,
            title,
            description,
            priority,
            start,
            due,
            clear_start,
            clear_due,
            clear_description,
        } => {
            let updates = TicketUpdate {
                title,
                description: if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                },
                priority: priority.map(Some),
                start_date: if clear_start { Some(None) } else { start.map(Some) },
                due_date: if clear_due { Some(None) } else { due.map(Some) },
                ..Default::default()
            };
            if updates.is_empty() {
                return Err("nothing to update".into());
            }
            let ticket = app.tickets().update_ticket(id, &updates).await?;
            emit(global, &ticket, || println!("Updated ticket {}", ticket.id))
        }
        TicketCommands::Move {
            id,
            column_id,
            position,
        } => {
            let ticket = match position {
                Some(position) => app.tickets().move_ticket_to(id, column_id, position).await?,
                None => app.tickets().move_ticket(id, column_id).await?,
            };
            emit(global, &ticket, || {
                println!("Moved ticket {} to column {}", ticket.id, ticket.column_id);
            })
        }
        TicketCommands::Delete { id } => {
            app.tickets().delete_ticket(id).await?;
            println!("Deleted ticket {id}");
            Ok(())
        }
    }
}

async fn users(app: &KanbanApp, global: &GlobalOpts, cmd: UserCommands) -> CliResult {
    enter(app, "/admin/users").await?;
    // The last-admin check reads the cache, so it must be warm.
    app.users().fetch_users().await?;
    match cmd {
        UserCommands::List => {
            let users = app.users().all_users().await;
            let admins = app.users().admin_count().await;
            emit(global, &users, || {
                for u in &users {
                    println!("{:>5}  {:<16} {:<6} {}", u.id, u.username, u.role, u.name);
                }
                println!("{} users, {} admins", users.len(), admins);
            })
        }
        UserCommands::Create {
            username,
            name,
            email,
            password,
        } => {
            let new = UserCreate {
                username,
                name,
                email,
                password,
            };
            let outcome = app.users().create_user(&new).await;
            finish(global, outcome, "User created.")
        }
        UserCommands::Update {
            id,
            name,
            email,
            role,
        } => {
            let updates = UserUpdate {
                name,
                email,
                role: role.map(Into::into),
            };
            let outcome = app.users().update_user(id, &updates).await;
            finish(global, outcome, "User updated.")
        }
        UserCommands::Delete { id } => {
            let outcome = app.users().delete_user(id).await;
            finish(global, outcome, "User deleted.")
        }
        UserCommands::ResetPassword { id, password } => {
            let outcome = app.users().reset_password(id, &password).await;
            finish(global, outcome, "Password reset.")
        }
    }
}
