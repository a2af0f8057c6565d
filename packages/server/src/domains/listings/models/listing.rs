use anyhow::Result as AnyResult;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CustomerId, ListingId};

/// Listing - a user-submitted classified advertisement
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: ListingId,
    pub customer_id: CustomerId,

    // Content
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,

    // Moderation
    pub approval_status: String, // 'pending', 'approved', 'rejected'
    pub is_harmful: bool,
    pub post_type: String, // 'regular', 'sponsored', 'promoted', 'admin'
    pub approved_by: Option<CustomerId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub moderation_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_reposted_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Enums for type-safe transitions
// =============================================================================

/// Moderation status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid approval status: {}", s)),
        }
    }
}

/// Post type enum (set when a listing is approved)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Regular,
    Sponsored,
    Promoted,
    Admin,
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Regular => write!(f, "regular"),
            PostType::Sponsored => write!(f, "sponsored"),
            PostType::Promoted => write!(f, "promoted"),
            PostType::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> AnyResult<Self> {
        match s {
            "regular" => Ok(PostType::Regular),
            "sponsored" => Ok(PostType::Sponsored),
            "promoted" => Ok(PostType::Promoted),
            "admin" => Ok(PostType::Admin),
            _ => Err(anyhow::anyhow!("Invalid post type: {}", s)),
        }
    }
}

impl Listing {
    /// Current approval status as the typed enum.
    pub fn status(&self) -> ApprovalStatus {
        // Column is constrained by a CHECK, unknown values cannot appear
        self.approval_status
            .parse()
            .unwrap_or(ApprovalStatus::Pending)
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Listing {
    /// Create a new listing (status starts as pending)
    pub async fn create(
        customer_id: CustomerId,
        category: String,
        title: String,
        description: String,
        price: Option<Decimal>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (id, customer_id, category, title, description, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ListingId::new())
        .bind(customer_id)
        .bind(category)
        .bind(title)
        .bind(description)
        .bind(price)
        .fetch_one(pool)
        .await
    }

    /// Find listing by ID
    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find listings by moderation status (the moderation queue)
    pub async fn find_by_status(
        status: &str,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings
             WHERE approval_status = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count listings by moderation status (for pagination)
    pub async fn count_by_status(status: &str, pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings WHERE approval_status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Approve a pending listing.
    ///
    /// The pending precondition is repeated in the WHERE clause so two
    /// concurrent moderators cannot both approve; the loser gets no row back.
    pub async fn apply_approval(
        id: ListingId,
        moderator_id: CustomerId,
        post_type: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET approval_status = 'approved',
                approved_by = $2,
                approved_at = NOW(),
                post_type = $3,
                updated_at = NOW()
            WHERE id = $1 AND approval_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(moderator_id)
        .bind(post_type)
        .fetch_optional(pool)
        .await
    }

    /// Reject a pending listing with a reason.
    pub async fn apply_rejection(
        id: ListingId,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET approval_status = 'rejected',
                rejection_reason = $2,
                updated_at = NOW()
            WHERE id = $1 AND approval_status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(pool)
        .await
    }

    /// Set the harmful flag and append the reason to moderation notes.
    ///
    /// Allowed from any approval state; does not touch approval_status.
    pub async fn apply_harmful_flag(
        id: ListingId,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET is_harmful = TRUE,
                moderation_notes = CASE
                    WHEN moderation_notes IS NULL THEN $2
                    ELSE moderation_notes || E'\n' || $2
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(pool)
        .await
    }

    /// Repost a listing: reset to pending and clear prior approval fields.
    ///
    /// Only valid from a terminal approval state (approved or rejected).
    pub async fn apply_repost(id: ListingId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET approval_status = 'pending',
                approved_by = NULL,
                approved_at = NULL,
                rejection_reason = NULL,
                created_at = NOW(),
                last_reposted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND approval_status IN ('approved', 'rejected')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a listing by ID (bulk-admin action, not part of the state machine)
    pub async fn delete(id: ListingId, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Purge listings older than the age threshold. Irreversible.
    ///
    /// Callers bound `age_days` via `machines::validate_purge_age`; a
    /// threshold that still cannot be represented deletes nothing.
    pub async fn purge_older_than(age_days: i64, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let cutoff = Duration::try_days(age_days)
            .and_then(|age| Utc::now().checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let result = sqlx::query("DELETE FROM listings WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
