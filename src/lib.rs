#![doc(test(attr(deny(warnings))))]

//! Budget Forecast turns a snapshot of balance, recurring income, bills, and
//! savings goals into a pay-cycle forecast: the next payday, which bills land
//! before it, what must be held back, and what is safe to spend.

pub mod config;
pub mod currency;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod time;
pub mod utils;

pub use errors::{ForecastError, Result};
pub use forecast::{build_forecast, build_forecast_with, ForecastInput, ForecastOutput};

use std::sync::Once;

static ENGINE_READY: Once = Once::new();

/// Prepares a host process to run forecasts.
///
/// Installs the `budget_forecast=info` log filter unless the host already set
/// up a subscriber, then logs the engine version once. Forecast calls do not
/// require it.
pub fn init() {
    ENGINE_READY.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            max_catch_up_steps = ledger::recurrence::MAX_CATCH_UP_STEPS,
            "forecast engine ready"
        );
    });
}
