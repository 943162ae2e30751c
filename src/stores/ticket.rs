use kanban_schema::{Id, Ticket, TicketCreate, TicketUpdate};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::api::{ApiClient, endpoints};
use crate::error::KanbanError;

pub struct TicketStore {
    api: ApiClient,
    all_tickets: RwLock<Vec<Ticket>>,
}

impl TicketStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            all_tickets: RwLock::new(Vec::new()),
        }
    }

    pub async fn all_tickets(&self) -> Vec<Ticket> {
        self.all_tickets.read().await.clone()
    }

    /// Cached tickets of one column, ordered by position.
    pub async fn get_tickets_by_column(&self, column_id: Id) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self
            .all_tickets
            .read()
            .await
            .iter()
            .filter(|t| t.column_id == column_id)
            .cloned()
            .collect();
        tickets.sort_by_key(|t| t.position);
        tickets
    }

    pub async fn get_tickets_by_board(&self, board_id: Id) -> Vec<Ticket> {
        self.all_tickets
            .read()
            .await
            .iter()
            .filter(|t| t.board_id == board_id)
            .cloned()
            .collect()
    }

    pub async fn fetch_tickets(&self, board_id: Id) -> Result<Vec<Ticket>, KanbanError> {
        let tickets: Vec<Ticket> = self
            .api
            .get(&endpoints::tickets_of_board(board_id))
            .await
            .inspect_err(|e| error!(board_id, error = %e, "failed to fetch tickets"))?;
        self.replace_board(board_id, tickets.clone()).await;
        Ok(tickets)
    }

    pub(crate) async fn replace_board(&self, board_id: Id, fresh: Vec<Ticket>) {
        let mut tickets = self.all_tickets.write().await;
        tickets.retain(|t| t.board_id != board_id);
        tickets.extend(fresh);
    }

    pub async fn create_ticket(&self, new: &TicketCreate) -> Result<Ticket, KanbanError> {
        let ticket: Ticket = self
            .api
            .post(endpoints::TICKETS, new)
            .await
            .inspect_err(|e| {
                error!(
                    board_id = new.board_id,
                    column_id = new.column_id,
                    error = %e,
                    "failed to create ticket"
                );
            })?;
        info!(
            ticket_id = ticket.id,
            column_id = ticket.column_id,
            position = ticket.position,
            "ticket created"
        );
        self.all_tickets.write().await.push(ticket.clone());
        Ok(ticket)
    }

    pub async fn update_ticket(
        &self,
        ticket_id: Id,
        updates: &TicketUpdate,
    ) -> Result<Ticket, KanbanError> {
        let ticket: Ticket = self
            .api
            .put(&endpoints::ticket(ticket_id), updates)
            .await
            .inspect_err(|e| error!(ticket_id, error = %e, "failed to update ticket"))?;
        if let Some(slot) = self
            .all_tickets
            .write()
            .await
            .iter_mut()
            .find(|t| t.id == ticket_id)
        {
            *slot = ticket.clone();
        }
        Ok(ticket)
    }

    /// Move a ticket to another column. The cache changes only after the
    /// server accepted the move.
    pub async fn move_ticket(&self, ticket_id: Id, new_column_id: Id) -> Result<Ticket, KanbanError> {
        self.update_ticket(ticket_id, &TicketUpdate::move_to(new_column_id))
            .await
    }

    /// Move a ticket to an explicit slot of a column.
    pub async fn move_ticket_to(
        &self,
        ticket_id: Id,
        column_id: Id,
        position: i64,
    ) -> Result<Ticket, KanbanError> {
        let updates = TicketUpdate {
            column_id: Some(column_id),
            position: Some(position),
            ..Default::default()
        };
        self.update_ticket(ticket_id, &updates).await
    }

    pub async fn delete_ticket(&self, ticket_id: Id) -> Result<(), KanbanError> {
        self.api
            .delete(&endpoints::ticket(ticket_id))
            .await
            .inspect_err(|e| error!(ticket_id, error = %e, "failed to delete ticket"))?;
        self.all_tickets.write().await.retain(|t| t.id != ticket_id);
        info!(ticket_id, "ticket deleted");
        Ok(())
    }

    /// Local only: drop cached tickets of a deleted board.
    pub async fn delete_tickets_by_board(&self, board_id: Id) {
        self.all_tickets
            .write()
            .await
            .retain(|t| t.board_id != board_id);
    }

    /// Local only: drop cached tickets of a deleted column.
    pub async fn delete_tickets_by_column(&self, column_id: Id) {
        self.all_tickets
            .write()
            .await
            .retain(|t| t.column_id != column_id);
    }
}
