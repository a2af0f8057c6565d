pub mod data;
pub mod effects;
pub mod events;
pub mod machines;
pub mod models;

// Re-export data types (wire DTOs)
pub use data::types::{
    ApproveListingInput, BulkApproveInput, BulkListingInput, BulkOutcome, BulkRejectInput,
    ListingData, MarkHarmfulInput, ModerationResult, PurgeInput, RejectListingInput,
    SubmitListingInput,
};

// Re-export events
pub use events::ListingEvent;

// Re-export models (domain models)
pub use models::listing::{ApprovalStatus, Listing, PostType};
