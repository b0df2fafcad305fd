use super::{contains_ci, next_id_after};
use crate::core::error::{DeskError, DeskResult};
use crate::message::Notifier;
use crate::money::validate_price;
use crate::numbering;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use chrono::NaiveDate;
use rand::Rng;
use shared::message::{SyncAction, SyncPayload, SyncResource};
use shared::models::{StatusFilter, Ticket, TicketCreate, TicketSettings, TicketUpdate};
use shared::types::EntityId;
use shared::util::now_millis;
use tokio::sync::broadcast;

/// Default number of draws before ticket numbering gives up
pub const DEFAULT_NUMBER_ATTEMPTS: u32 = 64;

/// Repair tickets and the option lists used to fill them in
#[derive(Debug)]
pub struct TicketsStore {
    pub(super) tickets: Vec<Ticket>,
    pub(super) settings: TicketSettings,
    next_id: EntityId,
    pub(super) next_model_id: EntityId,
    number_attempts: u32,
    pub(super) notifier: Notifier,
}

impl TicketsStore {
    pub fn new(notifier: Notifier) -> Self {
        Self::with_data(Vec::new(), TicketSettings::default(), notifier)
    }

    pub fn with_data(tickets: Vec<Ticket>, settings: TicketSettings, notifier: Notifier) -> Self {
        let next_id = next_id_after(tickets.iter().map(|t| t.id));
        let next_model_id = next_id_after(settings.models.iter().map(|m| m.id));
        Self {
            tickets,
            settings,
            next_id,
            next_model_id,
            number_attempts: DEFAULT_NUMBER_ATTEMPTS,
            notifier,
        }
    }

    pub fn with_number_attempts(mut self, attempts: u32) -> Self {
        self.number_attempts = attempts;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.notifier.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.notifier.version(SyncResource::Ticket)
    }

    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: EntityId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: EntityId) -> DeskResult<&Ticket> {
        self.get(id).ok_or(DeskError::TicketNotFound(id))
    }

    pub fn find_by_number(&self, ticket_number: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.ticket_number == ticket_number)
    }

    /// Create a ticket dated today with a fresh ticket number
    pub fn add(&mut self, input: TicketCreate) -> DeskResult<Ticket> {
        let today = chrono::Local::now().date_naive();
        self.add_with(input, today, &mut rand::thread_rng())
    }

    /// Create a ticket whose number is derived from `date` and drawn from `rng`
    pub fn add_with<R: Rng + ?Sized>(
        &mut self,
        input: TicketCreate,
        date: NaiveDate,
        rng: &mut R,
    ) -> DeskResult<Ticket> {
        validate_required_text(&input.device_type, "device_type", MAX_NAME_LEN)?;
        validate_required_text(&input.brand, "brand", MAX_NAME_LEN)?;
        validate_required_text(&input.model, "model", MAX_NAME_LEN)?;
        validate_optional_text(&input.issue, "issue", MAX_NOTE_LEN)?;
        validate_optional_text(&input.passcode, "passcode", MAX_SHORT_TEXT_LEN)?;
        validate_price(input.cost, "cost")?;

        let ticket_number =
            numbering::generate_ticket_number(date, self.number_attempts, rng, |candidate| {
                self.find_by_number(candidate).is_some()
            })?;

        let now = now_millis();
        let ticket = Ticket {
            id: self.next_id,
            ticket_number,
            client_id: input.client_id,
            device_type: input.device_type,
            brand: input.brand,
            model: input.model,
            tasks: input.tasks,
            issue: input.issue,
            status: input.status,
            cost: input.cost,
            technician_id: input.technician_id,
            passcode: input.passcode,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.tickets.push(ticket.clone());

        tracing::info!(
            ticket_id = ticket.id,
            ticket_number = %ticket.ticket_number,
            client_id = ticket.client_id,
            "Ticket created"
        );
        self.notifier
            .publish(SyncResource::Ticket, SyncAction::Created, ticket.id, &ticket);
        Ok(ticket)
    }

    /// Merge `update` into the ticket and bump `updated_at`
    pub fn update(&mut self, id: EntityId, update: TicketUpdate) -> DeskResult<Ticket> {
        if let Some(v) = &update.device_type {
            validate_required_text(v, "device_type", MAX_NAME_LEN)?;
        }
        if let Some(v) = &update.brand {
            validate_required_text(v, "brand", MAX_NAME_LEN)?;
        }
        if let Some(v) = &update.model {
            validate_required_text(v, "model", MAX_NAME_LEN)?;
        }
        validate_optional_text(&update.issue, "issue", MAX_NOTE_LEN)?;
        validate_optional_text(&update.passcode, "passcode", MAX_SHORT_TEXT_LEN)?;
        if let Some(cost) = update.cost {
            validate_price(cost, "cost")?;
        }

        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DeskError::TicketNotFound(id))?;
        // updated_at is monotonic
        let now = now_millis().max(ticket.updated_at);
        ticket.apply(update, now);
        let ticket = ticket.clone();

        tracing::debug!(ticket_id = id, status = %ticket.status, "Ticket updated");
        self.notifier
            .publish(SyncResource::Ticket, SyncAction::Updated, id, &ticket);
        Ok(ticket)
    }

    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| filter.accepts(t.status))
            .collect()
    }

    pub fn for_client(&self, client_id: EntityId) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.client_id == client_id)
            .collect()
    }

    /// Tickets whose number contains `query`, optionally limited to one client
    pub fn search(&self, query: &str, client_id: Option<EntityId>) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| client_id.is_none_or(|id| t.client_id == id))
            .filter(|t| contains_ci(&t.ticket_number, query))
            .collect()
    }
}
