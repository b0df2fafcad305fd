use crate::core::error::{DeskError, DeskResult};
use crate::message::Notifier;
use shared::message::{SyncAction, SyncPayload, SyncResource};
use shared::models::Sale;
use shared::types::EntityId;
use tokio::sync::broadcast;

/// Completed point-of-sale transactions
#[derive(Debug)]
pub struct SalesStore {
    sales: Vec<Sale>,
    notifier: Notifier,
}

impl SalesStore {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            sales: Vec::new(),
            notifier,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.notifier.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.notifier.version(SyncResource::Sale)
    }

    pub fn list(&self) -> &[Sale] {
        &self.sales
    }

    pub fn get(&self, invoice_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.invoice_id == invoice_id)
    }

    pub fn require(&self, invoice_id: &str) -> DeskResult<&Sale> {
        self.get(invoice_id)
            .ok_or_else(|| DeskError::SaleNotFound(invoice_id.to_string()))
    }

    pub fn contains_invoice(&self, invoice_id: &str) -> bool {
        self.get(invoice_id).is_some()
    }

    pub fn for_client(&self, client_id: EntityId) -> Vec<&Sale> {
        self.sales
            .iter()
            .filter(|s| s.client_id == Some(client_id))
            .collect()
    }

    /// Append a finished sale; invoice ids are unique
    pub fn record(&mut self, sale: Sale) -> DeskResult<Sale> {
        if self.contains_invoice(&sale.invoice_id) {
            return Err(DeskError::InvalidInput(format!(
                "invoice {} already recorded",
                sale.invoice_id
            )));
        }
        self.sales.push(sale.clone());

        tracing::info!(
            invoice_id = %sale.invoice_id,
            total = sale.total,
            payment_method = sale.payment_method.display_name(),
            "Sale recorded"
        );
        self.notifier.publish(
            SyncResource::Sale,
            SyncAction::Created,
            &sale.invoice_id,
            &sale,
        );
        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentMethod;

    fn sale(invoice_id: &str, client_id: Option<EntityId>) -> Sale {
        Sale {
            invoice_id: invoice_id.into(),
            lines: Vec::new(),
            client_id,
            ticket_id: None,
            subtotal: 10.0,
            vat: 2.0,
            total: 12.0,
            payment_method: PaymentMethod::Cash,
            note: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_record_and_lookup() {
        let mut store = SalesStore::new(Notifier::standalone());
        let mut rx = store.subscribe();
        store.record(sale("INV-240615-1234", Some(1))).unwrap();
        store.record(sale("INV-240615-5678", None)).unwrap();

        assert_eq!(store.list().len(), 2);
        assert!(store.require("INV-240615-1234").is_ok());
        assert!(matches!(
            store.require("INV-000000-0000"),
            Err(DeskError::SaleNotFound(_))
        ));
        assert_eq!(store.for_client(1).len(), 1);
        assert_eq!(rx.try_recv().unwrap().id, "INV-240615-1234");
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_duplicate_invoice_rejected() {
        let mut store = SalesStore::new(Notifier::standalone());
        store.record(sale("INV-240615-1234", None)).unwrap();
        assert!(store.record(sale("INV-240615-1234", None)).is_err());
        assert_eq!(store.list().len(), 1);
    }
}
