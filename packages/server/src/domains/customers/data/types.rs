//! Wire DTOs for the customers REST surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::CustomerId;
use crate::domains::customers::models::Customer;

/// Input for registering a customer
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Customer snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CustomerData {
    pub id: CustomerId,
    pub display_name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerData {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            display_name: customer.display_name,
            email: customer.email,
            is_admin: customer.is_admin,
            is_verified: customer.is_verified,
            created_at: customer.created_at,
        }
    }
}
