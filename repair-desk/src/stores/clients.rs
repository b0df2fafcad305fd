use super::next_id_after;
use crate::core::error::{DeskError, DeskResult};
use crate::message::Notifier;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text, validate_text_len,
};
use shared::message::{SyncAction, SyncPayload, SyncResource};
use shared::models::{Client, ClientCreate, ClientUpdate};
use shared::types::EntityId;
use shared::util::now_millis;
use tokio::sync::broadcast;

/// Client records
#[derive(Debug)]
pub struct ClientsStore {
    clients: Vec<Client>,
    next_id: EntityId,
    notifier: Notifier,
}

impl ClientsStore {
    pub fn new(notifier: Notifier) -> Self {
        Self::with_clients(Vec::new(), notifier)
    }

    /// Store pre-filled with `clients`; new ids continue after the highest one
    pub fn with_clients(clients: Vec<Client>, notifier: Notifier) -> Self {
        let next_id = next_id_after(clients.iter().map(|c| c.id));
        Self {
            clients,
            next_id,
            notifier,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.notifier.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.notifier.version(SyncResource::Client)
    }

    pub fn list(&self) -> &[Client] {
        &self.clients
    }

    pub fn get(&self, id: EntityId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn require(&self, id: EntityId) -> DeskResult<&Client> {
        self.get(id).ok_or(DeskError::ClientNotFound(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, input: ClientCreate) -> DeskResult<Client> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_text_len(&input.email, "email", MAX_EMAIL_LEN)?;
        validate_text_len(&input.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_text_len(&input.address, "address", MAX_ADDRESS_LEN)?;

        let client = Client {
            id: self.next_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            created_at: now_millis(),
        };
        self.next_id += 1;
        self.clients.push(client.clone());

        tracing::info!(client_id = client.id, name = %client.name, "Client created");
        self.notifier
            .publish(SyncResource::Client, SyncAction::Created, client.id, &client);
        Ok(client)
    }

    pub fn update(&mut self, id: EntityId, update: ClientUpdate) -> DeskResult<Client> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&update.email, "email", MAX_EMAIL_LEN)?;
        validate_optional_text(&update.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&update.address, "address", MAX_ADDRESS_LEN)?;

        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DeskError::ClientNotFound(id))?;
        client.apply(update);
        let client = client.clone();

        tracing::debug!(client_id = id, "Client updated");
        self.notifier
            .publish(SyncResource::Client, SyncAction::Updated, id, &client);
        Ok(client)
    }

    /// Clients whose name, email or phone contains `query`
    pub fn search(&self, query: &str) -> Vec<&Client> {
        self.clients.iter().filter(|c| c.matches(query)).collect()
    }
}
