pub mod data;
pub mod effects;
pub mod events;
pub mod machines;
pub mod models;

// Re-export data types (wire DTOs)
pub use data::types::{
    ConfirmEntryInput, LedgerResult, RecordEntryInput, ReportQuery, RevenueEntryData,
    RevenueReport,
};

// Re-export events
pub use events::RevenueEvent;

// Re-export models (domain models)
pub use models::revenue_entry::{EntryStatus, RevenueBreakdownRow, RevenueEntry};
