use thiserror::Error;

pub mod drop_log;
pub mod import;
pub mod record;
pub mod stats;

#[cfg(test)]
mod drop_log_tests;

pub use record::{format_gp, DropRecord};
pub use import::{import_text, parse_price, ImportOutcome, PriceScanner};
pub use drop_log::DropLog;
pub use stats::{compute_stats, DropStats};

/// Rejections raised while turning user input into a drop.
#[derive(Debug, PartialEq, Error)]
pub enum TrackerError {
    #[error("enter a price in gp")]
    InvalidPrice,
    #[error("enter time as HH and mm")]
    InvalidTime,
    #[error("choose a date")]
    InvalidDate,
}
