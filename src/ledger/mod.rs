//! Snapshot models supplied by the store, and the recurrence rules they share.

pub mod bill;
pub mod category;
pub mod goal;
pub mod income;
pub mod recurrence;
pub mod settings;

pub use bill::RecurringExpense;
pub use category::{categorize_description, SpendingCategory};
pub use goal::Goal;
pub use income::RecurringIncome;
pub use recurrence::{next_occurrence, period_length_days, Frequency, RecurrenceRule};
pub use settings::PaySettings;
