use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CustomerId;

/// Customer - a registered marketplace user.
///
/// Moderators are customers with `is_admin = true`. Authentication is
/// external; this record only anchors ownership and the KYC outcome.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub display_name: String,
    pub email: String,
    pub is_admin: bool,
    /// KYC verification outcome.
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Customer {
    /// Create a new customer
    pub async fn create(
        display_name: String,
        email: String,
        is_admin: bool,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, display_name, email, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(CustomerId::new())
        .bind(display_name)
        .bind(email)
        .bind(is_admin)
        .fetch_one(pool)
        .await
    }

    /// Find customer by ID
    pub async fn find_by_id(id: CustomerId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a customer as KYC-verified
    pub async fn mark_verified(
        id: CustomerId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET is_verified = TRUE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
