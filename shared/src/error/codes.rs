//! Unified error codes for the repair desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Client errors
//! - 2xxx: Ticket errors
//! - 3xxx: Ticket settings errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / sale errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Client ====================
    /// Client not found
    ClientNotFound = 1001,
    /// A client must be selected
    ClientRequired = 1002,

    // ==================== 2xxx: Ticket ====================
    /// Ticket not found
    TicketNotFound = 2001,
    /// No free ticket number left for the month
    TicketNumberExhausted = 2002,

    // ==================== 3xxx: Settings ====================
    /// Settings list entry not found
    SettingsEntryNotFound = 3001,
    /// Settings list entry already exists
    SettingsEntryExists = 3002,
    /// Device model not found
    ModelNotFound = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart line not found
    CartLineNotFound = 4006,
    /// Cart or order has no lines
    OrderEmpty = 4007,
    /// Quantity is not allowed here
    InvalidQuantity = 4008,
    /// Order item is missing a name
    OrderItemNameRequired = 4009,
    /// Order item price must be positive
    OrderItemInvalidPrice = 4010,
    /// Order form row not found
    OrderRowNotFound = 4011,

    // ==================== 5xxx: Payment ====================
    /// Sale not found
    SaleNotFound = 5001,
    /// Amount paid is invalid
    PaymentInvalidAmount = 5002,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,
    /// Requested quantity exceeds stock
    InsufficientStock = 6004,

    // ==================== 9xxx: System ====================
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Client
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ClientRequired => "Please select a client",

            // Ticket
            ErrorCode::TicketNotFound => "Ticket not found",
            ErrorCode::TicketNumberExhausted => "No free ticket number available",

            // Settings
            ErrorCode::SettingsEntryNotFound => "Settings entry not found",
            ErrorCode::SettingsEntryExists => "Settings entry already exists",
            ErrorCode::ModelNotFound => "Device model not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::InvalidQuantity => "Invalid quantity",
            ErrorCode::OrderItemNameRequired => "Please provide a name for all items",
            ErrorCode::OrderItemInvalidPrice => "Please provide a valid price for all items",
            ErrorCode::OrderRowNotFound => "Order item row not found",

            // Payment
            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::InsufficientStock => "Not enough stock",

            // System
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Client
            1001 => Ok(ErrorCode::ClientNotFound),
            1002 => Ok(ErrorCode::ClientRequired),

            // Ticket
            2001 => Ok(ErrorCode::TicketNotFound),
            2002 => Ok(ErrorCode::TicketNumberExhausted),

            // Settings
            3001 => Ok(ErrorCode::SettingsEntryNotFound),
            3002 => Ok(ErrorCode::SettingsEntryExists),
            3003 => Ok(ErrorCode::ModelNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::CartLineNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::InvalidQuantity),
            4009 => Ok(ErrorCode::OrderItemNameRequired),
            4010 => Ok(ErrorCode::OrderItemInvalidPrice),
            4011 => Ok(ErrorCode::OrderRowNotFound),

            // Payment
            5001 => Ok(ErrorCode::SaleNotFound),
            5002 => Ok(ErrorCode::PaymentInvalidAmount),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6004 => Ok(ErrorCode::InsufficientStock),

            // System
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
