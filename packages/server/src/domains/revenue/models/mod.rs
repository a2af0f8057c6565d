pub mod revenue_entry;

pub use revenue_entry::{EntryStatus, RevenueBreakdownRow, RevenueEntry};
