#![doc(test(attr(deny(warnings))))]

//! Ledgr keeps a solo service provider's day-by-day work log and turns it
//! into period totals: revenue, hours, tax to set aside, rent share, and net.

pub mod cli;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        core::utils::init_tracing();
        tracing::info!("Ledgr tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
