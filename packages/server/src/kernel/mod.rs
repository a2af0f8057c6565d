//! Kernel module - server infrastructure.

pub mod scheduled_tasks;

pub use scheduled_tasks::start_scheduler;
