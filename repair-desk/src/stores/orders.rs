use super::{contains_ci, next_id_after};
use crate::cart::replace_line;
use crate::core::error::{DeskError, DeskResult};
use crate::message::Notifier;
use crate::money::{self, validate_quantity};
use shared::message::{SyncAction, SyncPayload, SyncResource};
use shared::models::{
    CartLine, Client, InStoreOrder, InStoreOrderCreate, Order, OrderStatus, Product,
};
use shared::types::EntityId;
use shared::util::now_millis;
use tokio::sync::broadcast;

/// Identifier used for cart notifications
const CART_ID: &str = "cart";

/// Orders, the order-entry cart and in-store orders
#[derive(Debug)]
pub struct OrdersStore {
    orders: Vec<Order>,
    cart: Vec<CartLine>,
    in_store_orders: Vec<InStoreOrder>,
    next_id: EntityId,
    next_in_store_id: EntityId,
    notifier: Notifier,
}

impl OrdersStore {
    pub fn new(notifier: Notifier) -> Self {
        Self::with_orders(Vec::new(), notifier)
    }

    pub fn with_orders(orders: Vec<Order>, notifier: Notifier) -> Self {
        let next_id = next_id_after(orders.iter().map(|o| o.id));
        Self {
            orders,
            cart: Vec::new(),
            in_store_orders: Vec::new(),
            next_id,
            next_in_store_id: 1,
            notifier,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.notifier.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.notifier.version(SyncResource::Order)
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: EntityId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn require(&self, id: EntityId) -> DeskResult<&Order> {
        self.get(id).ok_or(DeskError::OrderNotFound(id))
    }

    // ── Cart ────────────────────────────────────────────────────────

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Put `quantity` of a product in the cart
    ///
    /// An existing line for the product is replaced, not incremented, and
    /// moves to the end of the cart.
    pub fn add_to_cart(&mut self, product_id: EntityId, quantity: i64) -> DeskResult<CartLine> {
        validate_quantity(quantity)?;
        let line = CartLine {
            product_id,
            quantity,
        };
        replace_line(&mut self.cart, line);

        tracing::debug!(product_id, quantity, "Cart line set");
        self.notifier
            .publish(SyncResource::Cart, SyncAction::Updated, product_id, &line);
        Ok(line)
    }

    pub fn remove_from_cart(&mut self, product_id: EntityId) -> DeskResult<CartLine> {
        let index = self
            .cart
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or(DeskError::CartLineNotFound(product_id))?;
        let line = self.cart.remove(index);

        tracing::debug!(product_id, "Cart line removed");
        self.notifier
            .publish_bare(SyncResource::Cart, SyncAction::Deleted, product_id);
        Ok(line)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notifier
            .publish_bare(SyncResource::Cart, SyncAction::Reset, CART_ID);
    }

    /// Cart totals at `tax_rate`, priced from `products`
    pub fn cart_totals(&self, products: &[Product], tax_rate: f64) -> money::Totals {
        money::compute_totals(&self.cart, |id| money::price_in(products, id), tax_rate)
    }

    // ── Orders ──────────────────────────────────────────────────────

    /// Turn the cart into a pending order for `client_id`
    ///
    /// The total is Σ quantity × current price, fixed at creation. The cart
    /// is emptied.
    pub fn create_order(&mut self, client_id: EntityId, products: &[Product]) -> DeskResult<Order> {
        if self.cart.is_empty() {
            return Err(DeskError::EmptyCart);
        }
        if let Some(missing) = self
            .cart
            .iter()
            .find(|l| money::price_in(products, l.product_id).is_none())
        {
            return Err(DeskError::ProductNotFound(missing.product_id));
        }

        let total = money::sum_lines(&self.cart, |id| money::price_in(products, id));
        let order = Order {
            id: self.next_id,
            items: std::mem::take(&mut self.cart),
            total,
            status: OrderStatus::Pending,
            client_id,
            created_at: now_millis(),
        };
        self.next_id += 1;
        self.orders.push(order.clone());

        tracing::info!(order_id = order.id, client_id, total, "Order created");
        self.notifier
            .publish(SyncResource::Order, SyncAction::Created, order.id, &order);
        Ok(order)
    }

    pub fn update_order_status(&mut self, id: EntityId, status: OrderStatus) -> DeskResult<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(DeskError::OrderNotFound(id))?;
        order.status = status;
        let order = order.clone();

        tracing::debug!(order_id = id, status = ?status, "Order status updated");
        self.notifier
            .publish(SyncResource::Order, SyncAction::Updated, id, &order);
        Ok(order)
    }

    /// Orders matching `query` (client name or order id) and `status`
    ///
    /// `None` for status matches every order.
    pub fn filter(
        &self,
        query: &str,
        status: Option<OrderStatus>,
        clients: &[Client],
    ) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .filter(|o| {
                let client_name = clients
                    .iter()
                    .find(|c| c.id == o.client_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or_default();
                query.is_empty()
                    || contains_ci(client_name, query)
                    || contains_ci(&o.id.to_string(), query)
            })
            .collect()
    }

    // ── In-store orders ─────────────────────────────────────────────

    pub fn in_store_orders(&self) -> &[InStoreOrder] {
        &self.in_store_orders
    }

    pub fn get_in_store_order(&self, id: EntityId) -> Option<&InStoreOrder> {
        self.in_store_orders.iter().find(|o| o.id == id)
    }

    /// Store a submitted in-store order form
    pub fn record_in_store_order(&mut self, input: InStoreOrderCreate) -> DeskResult<InStoreOrder> {
        if input.items.is_empty() {
            return Err(DeskError::EmptyCart);
        }
        if input.delivery_date < input.order_date {
            return Err(DeskError::InvalidInput(format!(
                "delivery date {} is before order date {}",
                input.delivery_date, input.order_date
            )));
        }

        let order = InStoreOrder {
            id: self.next_in_store_id,
            client_id: input.client_id,
            order_date: input.order_date,
            delivery_date: input.delivery_date,
            order_status: input.order_status,
            payment_status: input.payment_status,
            payment_method: input.payment_method,
            amount_paid: input.amount_paid,
            items: input.items,
            subtotal: input.subtotal,
            tax: input.tax,
            grand_total: input.grand_total,
            created_at: now_millis(),
        };
        self.next_in_store_id += 1;
        self.in_store_orders.push(order.clone());

        tracing::info!(
            in_store_order_id = order.id,
            client_id = order.client_id,
            grand_total = order.grand_total,
            "In-store order recorded"
        );
        self.notifier.publish(
            SyncResource::InStoreOrder,
            SyncAction::Created,
            order.id,
            &order,
        );
        Ok(order)
    }
}
