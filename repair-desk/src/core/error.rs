use shared::error::{AppError, ErrorCategory, ErrorCode};
use shared::types::EntityId;
use std::fmt;
use thiserror::Error;

/// Desk errors
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Client not found: {0}")]
    ClientNotFound(EntityId),

    #[error("Ticket not found: {0}")]
    TicketNotFound(EntityId),

    #[error("Product not found: {0}")]
    ProductNotFound(EntityId),

    #[error("Order not found: {0}")]
    OrderNotFound(EntityId),

    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    #[error("Device model not found: {0}")]
    ModelNotFound(EntityId),

    #[error("{list} entry not found: {value}")]
    SettingsEntryNotFound { list: &'static str, value: String },

    #[error("{list} entry already exists: {value}")]
    SettingsEntryExists { list: &'static str, value: String },

    #[error("Cart line not found for product {0}")]
    CartLineNotFound(EntityId),

    #[error("Order row not found: {0}")]
    RowNotFound(u32),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Product {0} is out of stock")]
    OutOfStock(EntityId),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: EntityId,
        requested: i64,
        available: i64,
    },

    #[error("No free number with prefix {prefix} after {attempts} attempts")]
    NumberExhausted { prefix: String, attempts: u32 },

    #[error("Invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Invalid price for product: {0}")]
    InvalidProductPrice(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DeskResult<T> = Result<T, DeskError>;

/// Reasons a form submission is blocked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a client")]
    MissingClient,

    #[error("Please provide a name for item {row}")]
    InvalidItemName { row: usize },

    #[error("Please provide a valid price for item {row}")]
    NonPositivePrice { row: usize },

    #[error("Price for item {row} exceeds the maximum allowed")]
    PriceTooHigh { row: usize },

    #[error("Please provide a valid quantity for item {row}")]
    NonPositiveQuantity { row: usize },

    #[error("Amount paid must not be negative")]
    NegativeAmountPaid,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingClient => ErrorCode::ClientRequired,
            Self::InvalidItemName { .. } => ErrorCode::OrderItemNameRequired,
            Self::NonPositivePrice { .. } | Self::PriceTooHigh { .. } => {
                ErrorCode::OrderItemInvalidPrice
            }
            Self::NonPositiveQuantity { .. } => ErrorCode::InvalidQuantity,
            Self::NegativeAmountPaid => ErrorCode::PaymentInvalidAmount,
        }
    }
}

/// Every issue found in one validation pass, in form order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, err: &ValidationError) -> bool {
        self.0.contains(err)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when no issue was found
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl From<ValidationErrors> for DeskError {
    fn from(errors: ValidationErrors) -> Self {
        DeskError::Validation(errors)
    }
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        let message = err.to_string();
        let app = match err {
            DeskError::ClientNotFound(id) => {
                AppError::with_message(ErrorCode::ClientNotFound, message).with_detail("id", id)
            }
            DeskError::TicketNotFound(id) => {
                AppError::with_message(ErrorCode::TicketNotFound, message).with_detail("id", id)
            }
            DeskError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("id", id)
            }
            DeskError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("id", id)
            }
            DeskError::SaleNotFound(invoice_id) => {
                AppError::with_message(ErrorCode::SaleNotFound, message)
                    .with_detail("invoice_id", invoice_id)
            }
            DeskError::ModelNotFound(id) => {
                AppError::with_message(ErrorCode::ModelNotFound, message).with_detail("id", id)
            }
            DeskError::SettingsEntryNotFound { list, value } => {
                AppError::with_message(ErrorCode::SettingsEntryNotFound, message)
                    .with_detail("list", list)
                    .with_detail("value", value)
            }
            DeskError::SettingsEntryExists { list, value } => {
                AppError::with_message(ErrorCode::SettingsEntryExists, message)
                    .with_detail("list", list)
                    .with_detail("value", value)
            }
            DeskError::CartLineNotFound(product_id) => {
                AppError::with_message(ErrorCode::CartLineNotFound, message)
                    .with_detail("product_id", product_id)
            }
            DeskError::RowNotFound(row_id) => {
                AppError::with_message(ErrorCode::OrderRowNotFound, message)
                    .with_detail("row_id", row_id)
            }
            DeskError::EmptyCart => AppError::with_message(ErrorCode::OrderEmpty, message),
            DeskError::InvalidQuantity(quantity) => {
                AppError::with_message(ErrorCode::InvalidQuantity, message)
                    .with_detail("quantity", quantity)
            }
            DeskError::OutOfStock(product_id) => {
                AppError::with_message(ErrorCode::ProductOutOfStock, message)
                    .with_detail("product_id", product_id)
            }
            DeskError::InsufficientStock {
                product_id,
                requested,
                available,
            } => AppError::with_message(ErrorCode::InsufficientStock, message)
                .with_detail("product_id", product_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            DeskError::NumberExhausted { prefix, attempts } => {
                AppError::with_message(ErrorCode::TicketNumberExhausted, message)
                    .with_detail("prefix", prefix)
                    .with_detail("attempts", attempts)
            }
            DeskError::InvalidAmount { field, value } => {
                AppError::with_message(ErrorCode::ValueOutOfRange, message)
                    .with_detail("field", field)
                    .with_detail("value", value)
            }
            DeskError::InvalidProductPrice(price) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, message)
                    .with_detail("price", price)
            }
            DeskError::InvalidInput(_) => AppError::validation(message),
            DeskError::Validation(errors) => {
                let code = match errors.0.as_slice() {
                    [single] => single.code(),
                    _ => ErrorCode::ValidationFailed,
                };
                let issues: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                AppError::with_message(code, message).with_detail("issues", issues)
            }
            DeskError::Config(_) => AppError::config(message),
        };

        if app.code.category() == ErrorCategory::System {
            tracing::error!(code = %app.code, message = %app.message, "System error occurred");
        }
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let app: AppError = DeskError::ProductNotFound(7).into();
        assert_eq!(app.code, ErrorCode::ProductNotFound);
        assert_eq!(app.message, "Product not found: 7");
        assert_eq!(app.details.unwrap().get("id").unwrap(), 7);
    }

    #[test]
    fn test_price_errors_conversion() {
        let app: AppError = DeskError::InvalidProductPrice(-5.0).into();
        assert_eq!(app.code, ErrorCode::ProductInvalidPrice);

        let app: AppError = DeskError::InvalidAmount {
            field: "cost",
            value: f64::INFINITY,
        }
        .into();
        assert_eq!(app.code, ErrorCode::ValueOutOfRange);
        assert_eq!(app.details.unwrap().get("field").unwrap(), "cost");
    }

    #[test]
    fn test_single_validation_issue_keeps_specific_code() {
        let errors = ValidationErrors(vec![ValidationError::MissingClient]);
        let app: AppError = DeskError::from(errors).into();
        assert_eq!(app.code, ErrorCode::ClientRequired);
    }

    #[test]
    fn test_multiple_validation_issues_use_generic_code() {
        let errors = ValidationErrors(vec![
            ValidationError::MissingClient,
            ValidationError::NonPositivePrice { row: 1 },
        ]);
        let app: AppError = DeskError::from(errors).into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);
        let issues = app.details.unwrap().remove("issues").unwrap();
        assert_eq!(issues.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = ValidationErrors(vec![
            ValidationError::MissingClient,
            ValidationError::InvalidItemName { row: 2 },
        ]);
        assert_eq!(
            errors.to_string(),
            "Please select a client; Please provide a name for item 2"
        );
        assert!(errors.clone().into_result().is_err());
        assert!(ValidationErrors::default().into_result().is_ok());
    }
}
