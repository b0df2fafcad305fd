use super::next_id_after;
use crate::core::error::{DeskError, DeskResult};
use crate::message::Notifier;
use crate::money::validate_price;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text, validate_text_len,
};
use shared::message::{SyncAction, SyncPayload, SyncResource};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::types::EntityId;
use tokio::sync::broadcast;

/// Product catalog and stock levels
#[derive(Debug)]
pub struct ProductsStore {
    products: Vec<Product>,
    categories: Vec<String>,
    next_id: EntityId,
    notifier: Notifier,
}

impl ProductsStore {
    pub fn new(notifier: Notifier) -> Self {
        Self::with_products(Vec::new(), Vec::new(), notifier)
    }

    pub fn with_products(
        products: Vec<Product>,
        categories: Vec<String>,
        notifier: Notifier,
    ) -> Self {
        let next_id = next_id_after(products.iter().map(|p| p.id));
        Self {
            products,
            categories,
            next_id,
            notifier,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncPayload> {
        self.notifier.subscribe()
    }

    pub fn version(&self) -> u64 {
        self.notifier.version(SyncResource::Product)
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: EntityId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: EntityId) -> DeskResult<&Product> {
        self.get(id).ok_or(DeskError::ProductNotFound(id))
    }

    pub fn price_of(&self, id: EntityId) -> Option<f64> {
        self.get(id).map(|p| p.price)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn add(&mut self, input: ProductCreate) -> DeskResult<Product> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&input.category, "category", MAX_NAME_LEN)?;
        validate_price(input.price, "price")
            .map_err(|_| DeskError::InvalidProductPrice(input.price))?;
        validate_text_len(&input.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        validate_text_len(&input.description, "description", MAX_NOTE_LEN)?;
        validate_text_len(&input.image_url, "image_url", MAX_URL_LEN)?;
        if input.stock < 0 {
            return Err(DeskError::InvalidInput(format!(
                "stock must be non-negative, got {}",
                input.stock
            )));
        }

        let product = Product {
            id: self.next_id,
            name: input.name,
            category: input.category,
            price: input.price,
            stock: input.stock,
            sku: input.sku,
            description: input.description,
            image_url: input.image_url,
        };
        self.next_id += 1;
        self.products.push(product.clone());

        tracing::info!(product_id = product.id, name = %product.name, "Product created");
        self.notifier
            .publish(SyncResource::Product, SyncAction::Created, product.id, &product);
        Ok(product)
    }

    pub fn update(&mut self, id: EntityId, update: ProductUpdate) -> DeskResult<Product> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(category) = &update.category {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }
        if let Some(price) = update.price {
            validate_price(price, "price").map_err(|_| DeskError::InvalidProductPrice(price))?;
        }
        validate_optional_text(&update.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&update.description, "description", MAX_NOTE_LEN)?;
        validate_optional_text(&update.image_url, "image_url", MAX_URL_LEN)?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DeskError::ProductNotFound(id))?;
        product.apply(update);
        let product = product.clone();

        tracing::debug!(product_id = id, "Product updated");
        self.notifier
            .publish(SyncResource::Product, SyncAction::Updated, id, &product);
        Ok(product)
    }

    /// Add a signed `delta` to the product's stock
    ///
    /// Stock never goes below zero; a delta that would do so is rejected
    /// and the stock is left untouched.
    pub fn update_stock(&mut self, id: EntityId, delta: i64) -> DeskResult<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DeskError::ProductNotFound(id))?;

        let new_stock = product.stock.checked_add(delta).ok_or_else(|| {
            DeskError::InvalidInput(format!(
                "stock delta {} overflows stock {} of product {}",
                delta, product.stock, id
            ))
        })?;
        if new_stock < 0 {
            tracing::warn!(product_id = id, delta, stock = product.stock, "Stock would go negative");
            return Err(DeskError::InsufficientStock {
                product_id: id,
                requested: delta.saturating_neg(),
                available: product.stock,
            });
        }
        product.stock = new_stock;
        let product = product.clone();

        tracing::debug!(product_id = id, delta, stock = new_stock, "Stock adjusted");
        self.notifier
            .publish(SyncResource::Product, SyncAction::Updated, id, &product);
        Ok(product)
    }

    /// Products matching `query` (name or description) within `category`
    ///
    /// The category [`ALL_CATEGORIES`](shared::models::ALL_CATEGORIES)
    /// matches every product.
    pub fn filtered(&self, query: &str, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches(query, category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ALL_CATEGORIES;

    fn input(name: &str, category: &str, price: f64, stock: i64) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            category: category.into(),
            price,
            stock,
            sku: name.to_uppercase().replace(' ', "-"),
            description: format!("{name} for testing"),
            image_url: String::new(),
        }
    }

    fn store() -> ProductsStore {
        let mut store = ProductsStore::with_products(
            Vec::new(),
            vec!["Phones".into(), "Laptops".into()],
            Notifier::standalone(),
        );
        store.add(input("Pixel 8", "Phones", 699.0, 4)).unwrap();
        store.add(input("ThinkPad X1", "Laptops", 1499.0, 2)).unwrap();
        store
    }

    #[test]
    fn test_add_and_get() {
        let store = store();
        assert_eq!(store.list().len(), 2);
        let pixel = store.require(1).unwrap();
        assert_eq!(pixel.name, "Pixel 8");
        assert_eq!(store.price_of(2), Some(1499.0));
        assert!(store.require(3).is_err());
    }

    #[test]
    fn test_add_rejects_bad_price_and_stock() {
        let mut store = store();
        assert!(matches!(
            store.add(input("Broken", "Phones", -5.0, 1)),
            Err(DeskError::InvalidProductPrice(_))
        ));
        assert!(matches!(
            store.add(input("Broken", "Phones", 1e30, 1)),
            Err(DeskError::InvalidProductPrice(_))
        ));
        assert!(store.add(input("Broken", "Phones", f64::NAN, 1)).is_err());
        assert!(store.add(input("Broken", "Phones", 5.0, -1)).is_err());
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_update_keeps_stock() {
        let mut store = store();
        let updated = store
            .update(
                1,
                ProductUpdate {
                    price: Some(649.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 649.0);
        assert_eq!(updated.stock, 4);
    }

    #[test]
    fn test_update_stock_extreme_deltas() {
        let mut store = store();
        assert!(matches!(
            store.update_stock(1, i64::MAX),
            Err(DeskError::InvalidInput(_))
        ));
        assert!(matches!(
            store.update_stock(1, i64::MIN),
            Err(DeskError::InsufficientStock {
                requested: i64::MAX,
                available: 4,
                ..
            })
        ));
        assert_eq!(store.require(1).unwrap().stock, 4);
    }

    #[test]
    fn test_update_stock_signed_delta() {
        let mut store = store();
        assert_eq!(store.update_stock(1, 3).unwrap().stock, 7);
        assert_eq!(store.update_stock(1, -7).unwrap().stock, 0);
    }

    #[test]
    fn test_update_stock_never_negative() {
        let mut store = store();
        let mut rx = store.subscribe();
        assert!(matches!(
            store.update_stock(2, -3),
            Err(DeskError::InsufficientStock {
                product_id: 2,
                requested: 3,
                available: 2
            })
        ));
        assert_eq!(store.require(2).unwrap().stock, 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_filtered() {
        let store = store();
        assert_eq!(store.filtered("", ALL_CATEGORIES).len(), 2);
        assert_eq!(store.filtered("", "Phones").len(), 1);
        assert_eq!(store.filtered("thinkpad", ALL_CATEGORIES).len(), 1);
        assert_eq!(store.filtered("for testing", "Laptops").len(), 1);
        assert!(store.filtered("pixel", "Laptops").is_empty());
    }

    #[test]
    fn test_categories() {
        assert_eq!(store().categories(), ["Phones", "Laptops"]);
    }
}
