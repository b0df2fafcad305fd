pub mod config;
pub mod error;
pub mod state;

pub use config::DeskConfig;
pub use error::{DeskError, DeskResult, ValidationError, ValidationErrors};
pub use state::DeskState;
