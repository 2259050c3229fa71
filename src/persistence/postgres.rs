//! PostgreSQL implementation of the business store.
//!
//! Expects a `businesses` table shaped as:
//!
//! ```sql
//! CREATE TABLE businesses (
//!     id              TEXT PRIMARY KEY,
//!     owner_id        TEXT,
//!     name            TEXT NOT NULL,
//!     email           TEXT NOT NULL,
//!     phone           TEXT,
//!     website         TEXT,
//!     description     TEXT,
//!     category        TEXT,
//!     address         TEXT,
//!     city            TEXT,
//!     image_url       TEXT,
//!     hours           JSONB,
//!     manual_override TEXT,
//!     created_at      TIMESTAMPTZ NOT NULL,
//!     updated_at      TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use super::{BusinessStore, StoreError};
use crate::domain::business::{Business, BusinessDraft, BusinessUpdate};
use crate::domain::business_id::BusinessId;
use crate::domain::hours::ManualOverride;
use crate::domain::listing::{BusinessListing, BusinessPage, ListOptions, UNPAGED_CAP};

/// Column list shared by every query that reads full records.
const COLUMNS: &str = "id, owner_id, name, email, phone, website, description, category, \
     address, city, image_url, hours, manual_override, created_at, updated_at";

/// Raw row tuple in [`COLUMNS`] order.
type BusinessRow = (
    String,
    Option<String>,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<Value>,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// PostgreSQL-backed business store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresBusinessStore {
    pool: PgPool,
}

impl PostgresBusinessStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_page(
        &self,
        page: u32,
        options: &ListOptions,
    ) -> Result<BusinessListing, StoreError> {
        let page = page.max(1);
        let per_page = options.per_page.max(1);
        let offset = (i64::from(page) - 1) * i64::from(per_page);

        let (total, rows) = if let Some(category) = &options.category {
            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM businesses WHERE LOWER(category) = LOWER($1)",
            )
            .bind(category)
            .fetch_one(&self.pool)
            .await?;

            let sql = format!(
                "SELECT {COLUMNS} FROM businesses WHERE LOWER(category) = LOWER($1) \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
            );
            let rows = sqlx::query_as::<_, BusinessRow>(&sql)
                .bind(category)
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
            (total, rows)
        } else {
            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses")
                .fetch_one(&self.pool)
                .await?;

            let sql = format!(
                "SELECT {COLUMNS} FROM businesses ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            );
            let rows = sqlx::query_as::<_, BusinessRow>(&sql)
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
            (total, rows)
        };

        let total = u64::try_from(total).unwrap_or(0);
        let total_pages = if total == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };

        Ok(BusinessListing::Paged(BusinessPage {
            businesses: rows.into_iter().map(row_into_business).collect(),
            total,
            page,
            total_pages,
        }))
    }

    async fn list_unpaged(&self, options: &ListOptions) -> Result<BusinessListing, StoreError> {
        let rows = if let Some(category) = &options.category {
            let sql = format!(
                "SELECT {COLUMNS} FROM businesses WHERE LOWER(category) = LOWER($1) \
                 ORDER BY created_at DESC LIMIT {UNPAGED_CAP}"
            );
            sqlx::query_as::<_, BusinessRow>(&sql)
                .bind(category)
                .fetch_all(&self.pool)
                .await?
        } else {
            let sql = format!(
                "SELECT {COLUMNS} FROM businesses ORDER BY created_at DESC LIMIT {UNPAGED_CAP}"
            );
            sqlx::query_as::<_, BusinessRow>(&sql)
                .fetch_all(&self.pool)
                .await?
        };

        Ok(BusinessListing::Unpaged(
            rows.into_iter().map(row_into_business).collect(),
        ))
    }
}

#[async_trait]
impl BusinessStore for PostgresBusinessStore {
    async fn probe(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, draft: BusinessDraft) -> Result<Business, StoreError> {
        let business = draft.into_business(BusinessId::generate(), Utc::now());

        sqlx::query(
            "INSERT INTO businesses (id, owner_id, name, email, phone, website, description, \
             category, address, city, image_url, hours, manual_override, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(business.id.as_str())
        .bind(&business.owner_id)
        .bind(&business.name)
        .bind(&business.email)
        .bind(&business.phone)
        .bind(&business.website)
        .bind(&business.description)
        .bind(&business.category)
        .bind(&business.address)
        .bind(&business.city)
        .bind(&business.image_url)
        .bind(&business.hours)
        .bind(business.manual_override.as_db())
        .bind(business.created_at)
        .bind(business.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(business)
    }

    async fn get_by_id(&self, id: &BusinessId) -> Result<Option<Business>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM businesses WHERE id = $1");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(row_into_business))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Business>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM businesses WHERE LOWER(email) = LOWER($1)");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(row_into_business))
    }

    async fn get_by_owner(&self, owner_id: &str) -> Result<Option<Business>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM businesses WHERE owner_id = $1 LIMIT 1");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(row_into_business))
    }

    async fn update(
        &self,
        id: &BusinessId,
        patch: &BusinessUpdate,
    ) -> Result<Option<Business>, StoreError> {
        let Some(mut business) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut business, Utc::now());

        sqlx::query(
            "UPDATE businesses SET owner_id = $2, name = $3, email = $4, phone = $5, \
             website = $6, description = $7, category = $8, address = $9, city = $10, \
             image_url = $11, hours = $12, manual_override = $13, updated_at = $14 \
             WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(&business.owner_id)
        .bind(&business.name)
        .bind(&business.email)
        .bind(&business.phone)
        .bind(&business.website)
        .bind(&business.description)
        .bind(&business.category)
        .bind(&business.address)
        .bind(&business.city)
        .bind(&business.image_url)
        .bind(&business.hours)
        .bind(business.manual_override.as_db())
        .bind(business.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Some(business))
    }

    async fn delete(&self, id: &BusinessId) -> Result<Option<Business>, StoreError> {
        let sql = format!("DELETE FROM businesses WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, BusinessRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(row_into_business))
    }

    async fn list(&self, options: &ListOptions) -> Result<BusinessListing, StoreError> {
        match options.page {
            Some(page) => self.list_page(page, options).await,
            None => self.list_unpaged(options).await,
        }
    }
}

fn row_into_business(row: BusinessRow) -> Business {
    let (
        id,
        owner_id,
        name,
        email,
        phone,
        website,
        description,
        category,
        address,
        city,
        image_url,
        hours,
        manual_override,
        created_at,
        updated_at,
    ) = row;

    Business {
        id: BusinessId::from(id),
        owner_id,
        name,
        email,
        phone,
        website,
        description,
        category,
        address,
        city,
        image_url,
        hours: hours.unwrap_or(Value::Null),
        manual_override: ManualOverride::from_db(manual_override.as_deref()),
        created_at,
        updated_at,
    }
}
