pub mod data;
pub mod models;

pub use data::types::{CreateCustomerInput, CustomerData};
pub use models::customer::Customer;
