pub mod customers;
pub mod listings;
pub mod placements;
pub mod revenue;
