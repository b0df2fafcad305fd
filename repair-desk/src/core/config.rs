use crate::core::error::{DeskError, DeskResult};

/// Desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | POS_VAT_RATE | 0.20 | VAT rate applied at the point of sale |
/// | ORDER_TAX_RATE | 0.20 | Tax rate applied to in-store orders |
/// | SEED_FIXTURES | true | Seed the stores with demo records |
/// | LOG_LEVEL | info | Max tracing level |
/// | EVENT_CHANNEL_CAPACITY | 256 | Change notification buffer |
/// | TICKET_NUMBER_ATTEMPTS | 64 | Draws before number generation gives up |
///
/// # Example
///
/// ```ignore
/// POS_VAT_RATE=0.21 LOG_LEVEL=debug cargo run -p repair-desk
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub pos_vat_rate: f64,
    pub order_tax_rate: f64,
    pub seed_fixtures: bool,
    pub log_level: String,
    pub event_channel_capacity: usize,
    pub ticket_number_attempts: u32,
}

const DEFAULT_TAX_RATE: f64 = 0.20;
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;
const DEFAULT_TICKET_NUMBER_ATTEMPTS: u32 = 64;

impl DeskConfig {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            pos_vat_rate: std::env::var("POS_VAT_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TAX_RATE),
            order_tax_rate: std::env::var("ORDER_TAX_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TAX_RATE),
            seed_fixtures: std::env::var("SEED_FIXTURES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_EVENT_CHANNEL_CAPACITY),
            ticket_number_attempts: std::env::var("TICKET_NUMBER_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TICKET_NUMBER_ATTEMPTS),
        }
    }

    /// Check ranges that a parse alone can't enforce
    pub fn validate(&self) -> DeskResult<()> {
        check_rate(self.pos_vat_rate, "POS_VAT_RATE")?;
        check_rate(self.order_tax_rate, "ORDER_TAX_RATE")?;
        if self.event_channel_capacity == 0 {
            return Err(DeskError::Config(
                "EVENT_CHANNEL_CAPACITY must be greater than 0".into(),
            ));
        }
        if self.ticket_number_attempts == 0 {
            return Err(DeskError::Config(
                "TICKET_NUMBER_ATTEMPTS must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn check_rate(rate: f64, name: &str) -> DeskResult<()> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(DeskError::Config(format!(
            "{name} must be between 0 and 1, got {rate}"
        )));
    }
    Ok(())
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            pos_vat_rate: DEFAULT_TAX_RATE,
            order_tax_rate: DEFAULT_TAX_RATE,
            seed_fixtures: true,
            log_level: "info".into(),
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            ticket_number_attempts: DEFAULT_TICKET_NUMBER_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DeskConfig::default();
        assert_eq!(config.pos_vat_rate, 0.20);
        assert_eq!(config.order_tax_rate, 0.20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let config = DeskConfig {
            pos_vat_rate: 1.5,
            ..DeskConfig::default()
        };
        assert!(matches!(config.validate(), Err(DeskError::Config(_))));

        let config = DeskConfig {
            order_tax_rate: -0.1,
            ..DeskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = DeskConfig {
            event_channel_capacity: 0,
            ..DeskConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
