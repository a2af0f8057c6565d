use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{CustomerId, DomainError};
use crate::domains::customers::{CreateCustomerInput, Customer, CustomerData};
use crate::server::app::AppState;

pub async fn create_customer(
    Extension(state): Extension<AppState>,
    Json(input): Json<CreateCustomerInput>,
) -> Result<Json<CustomerData>, DomainError> {
    if input.display_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "display_name must not be empty".to_string(),
        ));
    }
    if !input.email.contains('@') {
        return Err(DomainError::Validation(
            "email must be a valid address".to_string(),
        ));
    }

    let customer = Customer::create(
        input.display_name,
        input.email,
        input.is_admin,
        &state.db_pool,
    )
    .await?;

    Ok(Json(customer.into()))
}

pub async fn get_customer(
    Path(id): Path<CustomerId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<CustomerData>, DomainError> {
    let customer = Customer::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(DomainError::NotFound("customer"))?;

    Ok(Json(customer.into()))
}

pub async fn verify_customer(
    Path(id): Path<CustomerId>,
    Extension(state): Extension<AppState>,
) -> Result<Json<CustomerData>, DomainError> {
    let customer = Customer::mark_verified(id, &state.db_pool)
        .await?
        .ok_or(DomainError::NotFound("customer"))?;

    Ok(Json(customer.into()))
}
