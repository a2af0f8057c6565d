//! Typed ID aliases for all domain entities.
//!
//! Each entity gets its own marker type so ids cannot be mixed up at
//! compile time (a `ListingId` is not assignable to a `CustomerId`).

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Customer entities (listing owners and moderators).
pub struct Customer;

/// Marker type for Listing entities (classified advertisements).
pub struct Listing;

/// Marker type for MonetizedPlacement entities (paid, time-bounded slots).
pub struct Placement;

/// Marker type for RevenueEntry entities (ledger records).
pub struct RevenueEntry;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Customer entities.
pub type CustomerId = Id<Customer>;

/// Typed ID for Listing entities.
pub type ListingId = Id<Listing>;

/// Typed ID for MonetizedPlacement entities.
pub type PlacementId = Id<Placement>;

/// Typed ID for RevenueEntry entities.
pub type RevenueEntryId = Id<RevenueEntry>;
