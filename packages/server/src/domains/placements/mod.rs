pub mod data;
pub mod effects;
pub mod events;
pub mod machines;
pub mod models;

// Re-export data types (wire DTOs)
pub use data::types::{
    ActivityData, ActivityQuery, ConfirmPaymentInput, PlacementData, PlacementResult,
    PurchasePlacementInput,
};

// Re-export events
pub use events::PlacementEvent;

// Re-export models (domain models)
pub use models::placement::{
    PaymentStatus, Placement, PlacementKind, PlacementStatus, TargetKind,
};
