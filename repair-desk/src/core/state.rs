use crate::core::config::DeskConfig;
use crate::core::error::{DeskError, DeskResult};
use crate::fixtures;
use crate::message::Notifier;
use crate::money::Totals;
use crate::order_entry::OrderDraft;
use crate::pos::PosSession;
use crate::stores::{ClientsStore, OrdersStore, ProductsStore, SalesStore, TicketsStore};
use chrono::NaiveDate;
use rand::Rng;
use shared::message::SyncPayload;
use shared::models::{CartLine, InStoreOrder, Order, Sale, Ticket, TicketCreate};
use shared::types::EntityId;
use shared::util::now_millis;
use tokio::sync::broadcast;

/// Desk state - owns every store and the change notification channel
///
/// Stores are public so callers can read them and use the single-store
/// mutators directly. Operations spanning several stores (a ticket needs
/// an existing client, checkout reads products and writes sales) live
/// here.
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | clients | ClientsStore | client records |
/// | tickets | TicketsStore | tickets and ticket settings |
/// | products | ProductsStore | catalog and stock |
/// | orders | OrdersStore | orders, order-entry cart, in-store orders |
/// | sales | SalesStore | completed POS sales |
/// | pos | PosSession | current POS cart and selections |
#[derive(Debug)]
pub struct DeskState {
    config: DeskConfig,
    sync_tx: broadcast::Sender<SyncPayload>,
    pub clients: ClientsStore,
    pub tickets: TicketsStore,
    pub products: ProductsStore,
    pub orders: OrdersStore,
    pub sales: SalesStore,
    pub pos: PosSession,
}

impl DeskState {
    /// Empty desk
    pub fn new(config: DeskConfig) -> DeskResult<Self> {
        config.validate()?;
        let (sync_tx, _) = broadcast::channel(config.event_channel_capacity);
        let notifier = || Notifier::new(sync_tx.clone());

        Ok(Self {
            clients: ClientsStore::new(notifier()),
            tickets: TicketsStore::new(notifier())
                .with_number_attempts(config.ticket_number_attempts),
            products: ProductsStore::with_products(
                Vec::new(),
                fixtures::categories(),
                notifier(),
            ),
            orders: OrdersStore::new(notifier()),
            sales: SalesStore::new(notifier()),
            pos: PosSession::new().with_number_attempts(config.ticket_number_attempts),
            sync_tx,
            config,
        })
    }

    /// Desk pre-filled with the demo records
    pub fn seeded(config: DeskConfig) -> DeskResult<Self> {
        config.validate()?;
        let (sync_tx, _) = broadcast::channel(config.event_channel_capacity);
        let notifier = || Notifier::new(sync_tx.clone());
        let now = now_millis();

        Ok(Self {
            clients: ClientsStore::with_clients(fixtures::clients(now), notifier()),
            tickets: TicketsStore::with_data(
                fixtures::tickets(now),
                fixtures::ticket_settings(),
                notifier(),
            )
            .with_number_attempts(config.ticket_number_attempts),
            products: ProductsStore::with_products(
                fixtures::products(),
                fixtures::categories(),
                notifier(),
            ),
            orders: OrdersStore::with_orders(fixtures::orders(now), notifier()),
            sales: SalesStore::new(notifier()),
            pos: PosSession::new().with_number_attempts(config.ticket_number_attempts),
            sync_tx,
            config,
        })
    }

    /// Seeded or empty depending on `config.seed_fixtures`
    pub fn initialize(config: DeskConfig) -> DeskResult<Self> {
        let state = if config.seed_fixtures {
            Self::seeded(config)?
        } else {
            Self::new(config)?
        };
        tracing::info!(
            clients = state.clients.list().len(),
            tickets = state.tickets.list().len(),
            products = state.products.list().len(),
            orders = state.orders.list().len(),
            "Desk state initialized"
        );
        Ok(state)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Receive change notifications from every store
    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.sync_tx.subscribe()
    }

    // ── Tickets ─────────────────────────────────────────────────────

    /// Open a ticket for an existing client
    pub fn create_ticket(&mut self, input: TicketCreate) -> DeskResult<Ticket> {
        let today = chrono::Local::now().date_naive();
        self.create_ticket_with(input, today, &mut rand::thread_rng())
    }

    pub fn create_ticket_with<R: Rng + ?Sized>(
        &mut self,
        input: TicketCreate,
        date: NaiveDate,
        rng: &mut R,
    ) -> DeskResult<Ticket> {
        self.clients.require(input.client_id)?;
        self.tickets.add_with(input, date, rng)
    }

    // ── Order entry ─────────────────────────────────────────────────

    /// Put a known product in the order-entry cart
    pub fn add_to_order_cart(&mut self, product_id: EntityId, quantity: i64) -> DeskResult<CartLine> {
        self.products.require(product_id)?;
        self.orders.add_to_cart(product_id, quantity)
    }

    pub fn order_cart_totals(&self) -> Totals {
        self.orders
            .cart_totals(self.products.list(), self.config.order_tax_rate)
    }

    /// Turn the order-entry cart into a pending order for an existing client
    pub fn create_order(&mut self, client_id: EntityId) -> DeskResult<Order> {
        self.clients.require(client_id)?;
        self.orders.create_order(client_id, self.products.list())
    }

    /// Blank in-store order form using the configured tax rate
    pub fn new_order_draft(&self, today: NaiveDate) -> OrderDraft {
        OrderDraft::new(today, self.config.order_tax_rate)
    }

    /// Record the draft as an in-store order and reset it for `today`
    ///
    /// On failure the draft is left as it was.
    pub fn submit_order_draft(
        &mut self,
        draft: &mut OrderDraft,
        today: NaiveDate,
    ) -> DeskResult<InStoreOrder> {
        let input = draft.to_create()?;
        self.clients.require(input.client_id)?;
        let order = self.orders.record_in_store_order(input)?;
        draft.reset(today);
        Ok(order)
    }

    // ── Point of sale ───────────────────────────────────────────────

    pub fn pos_add_product(&mut self, product_id: EntityId) -> DeskResult<i64> {
        let product = self.products.require(product_id)?;
        self.pos.add_product(product)
    }

    pub fn pos_adjust_quantity(
        &mut self,
        product_id: EntityId,
        quantity: i64,
    ) -> DeskResult<Option<CartLine>> {
        let product = self.products.require(product_id)?;
        self.pos.adjust_cart_quantity(product, quantity)
    }

    pub fn pos_select_client(&mut self, client_id: Option<EntityId>) -> DeskResult<()> {
        if let Some(id) = client_id {
            self.clients.require(id)?;
        }
        self.pos.select_client(client_id);
        Ok(())
    }

    pub fn pos_select_ticket(&mut self, ticket_id: Option<EntityId>) -> DeskResult<()> {
        if let Some(id) = ticket_id {
            self.tickets.require(id)?;
        }
        self.pos.select_ticket(ticket_id);
        Ok(())
    }

    pub fn pos_totals(&self) -> Totals {
        self.pos.totals(self.products.list(), self.config.pos_vat_rate)
    }

    /// Complete the POS sale dated today
    pub fn pos_checkout(&mut self) -> DeskResult<Sale> {
        let today = chrono::Local::now().date_naive();
        self.pos_checkout_with(today, &mut rand::thread_rng())
    }

    /// Complete the POS sale, record it and clear the session
    ///
    /// Stock levels are not changed.
    pub fn pos_checkout_with<R: Rng + ?Sized>(
        &mut self,
        date: NaiveDate,
        rng: &mut R,
    ) -> DeskResult<Sale> {
        let sale = self.pos.checkout(
            self.products.list(),
            self.config.pos_vat_rate,
            date,
            rng,
            |invoice_id| self.sales.contains_invoice(invoice_id),
        )?;
        let sale = self.sales.record(sale)?;
        self.pos.clear();
        Ok(sale)
    }

    /// Look up the sale for an invoice id
    pub fn sale(&self, invoice_id: &str) -> DeskResult<&Sale> {
        self.sales
            .get(invoice_id)
            .ok_or_else(|| DeskError::SaleNotFound(invoice_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shared::models::TicketStatus;

    fn june() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_seeded_state() {
        let state = DeskState::seeded(DeskConfig::default()).unwrap();
        assert_eq!(state.clients.list().len(), 3);
        assert_eq!(state.tickets.list().len(), 3);
        assert_eq!(state.products.list().len(), 3);
        assert_eq!(state.orders.list().len(), 3);
        assert_eq!(state.products.categories().len(), 4);
        assert_eq!(state.tickets.settings().models.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DeskConfig {
            event_channel_capacity: 0,
            ..DeskConfig::default()
        };
        assert!(matches!(DeskState::new(config), Err(DeskError::Config(_))));
    }

    #[test]
    fn test_ticket_needs_existing_client() {
        let mut state = DeskState::seeded(DeskConfig::default()).unwrap();
        let input = TicketCreate {
            client_id: 99,
            device_type: "Mobile".into(),
            brand: "Apple".into(),
            model: "iPhone 14".into(),
            tasks: Vec::new(),
            issue: None,
            status: TicketStatus::Pending,
            cost: 0.0,
            technician_id: 1,
            passcode: None,
        };
        let result = state.create_ticket_with(input, june(), &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(DeskError::ClientNotFound(99))));
        assert_eq!(state.tickets.list().len(), 3);
    }

    #[test]
    fn test_new_ids_continue_after_fixtures() {
        let mut state = DeskState::seeded(DeskConfig::default()).unwrap();
        state.add_to_order_cart(1, 1).unwrap();
        let order = state.create_order(1).unwrap();
        assert_eq!(order.id, 4);
        assert_eq!(order.total, 999.0);
    }

    #[test]
    fn test_pos_checkout_records_sale_and_clears_session() {
        let mut state = DeskState::seeded(DeskConfig::default()).unwrap();
        state.pos_add_product(1).unwrap();
        state.pos_select_client(Some(2)).unwrap();

        let sale = state
            .pos_checkout_with(june(), &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(sale.subtotal, 999.0);
        assert_eq!(sale.vat, 199.8);
        assert_eq!(sale.total, 1198.8);
        assert!(state.sale(&sale.invoice_id).is_ok());
        assert!(state.pos.cart().is_empty());
        assert_eq!(state.products.require(1).unwrap().stock, 10);
    }

    #[test]
    fn test_pos_select_unknown_client() {
        let mut state = DeskState::seeded(DeskConfig::default()).unwrap();
        assert!(state.pos_select_client(Some(42)).is_err());
        assert_eq!(state.pos.client_id(), None);
    }
}
