//! Ticket numbers and invoice ids
//!
//! Both are a date-derived prefix followed by four random digits:
//! `jun4821` for tickets, `INV-240615-4821` for POS sales.

use crate::core::error::{DeskError, DeskResult};
use chrono::NaiveDate;
use rand::Rng;
use shared::util::month_abbrev;

/// Range of the random suffix
pub const SUFFIX_MIN: u32 = 1000;
pub const SUFFIX_MAX: u32 = 9999;

pub fn ticket_prefix(date: NaiveDate) -> String {
    month_abbrev(date)
}

pub fn invoice_prefix(date: NaiveDate) -> String {
    format!("INV-{}-", date.format("%y%m%d"))
}

/// One draw: prefix plus a suffix in `SUFFIX_MIN..=SUFFIX_MAX`
pub fn draw<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    format!("{}{}", prefix, rng.gen_range(SUFFIX_MIN..=SUFFIX_MAX))
}

/// Draw until a candidate is not taken, giving up after `attempts` draws
pub fn unique_number<R, F>(prefix: &str, attempts: u32, rng: &mut R, is_taken: F) -> DeskResult<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..attempts {
        let candidate = draw(prefix, rng);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(candidate = %candidate, "Number already taken, drawing again");
    }
    tracing::warn!(prefix = %prefix, attempts, "Number space exhausted");
    Err(DeskError::NumberExhausted {
        prefix: prefix.to_string(),
        attempts,
    })
}

/// Ticket number for a ticket created on `date`, unique against `is_taken`
pub fn generate_ticket_number<R, F>(
    date: NaiveDate,
    attempts: u32,
    rng: &mut R,
    is_taken: F,
) -> DeskResult<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    unique_number(&ticket_prefix(date), attempts, rng, is_taken)
}

/// Invoice id for a sale made on `date`, unique against `is_taken`
pub fn generate_invoice_id<R, F>(
    date: NaiveDate,
    attempts: u32,
    rng: &mut R,
    is_taken: F,
) -> DeskResult<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    unique_number(&invoice_prefix(date), attempts, rng, is_taken)
}
