//! Unified error system for the repair desk
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: rich error type with code, message and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Client errors
//! - 2xxx: Ticket errors
//! - 3xxx: Ticket settings errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / sale errors
//! - 6xxx: Product errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ClientNotFound);
//! assert_eq!(err.code.code(), 1001);
//!
//! let err = AppError::validation("Please select a client")
//!     .with_detail("field", "client_id");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
