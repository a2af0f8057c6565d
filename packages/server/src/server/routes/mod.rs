pub mod customers;
pub mod health;
pub mod listings;
pub mod placements;
pub mod revenue;
