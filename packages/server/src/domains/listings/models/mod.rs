pub mod listing;

pub use listing::{ApprovalStatus, Listing, PostType};
