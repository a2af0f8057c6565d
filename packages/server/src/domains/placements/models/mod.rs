pub mod placement;

pub use placement::{PaymentStatus, Placement, PlacementKind, PlacementStatus, TargetKind};
