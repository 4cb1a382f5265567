use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::domain::models::booking::{Booking, BookingStatus, NewBooking};
use crate::storage::traits::BookingStore;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:bookings.db";

/// DbConnection manages database operations for bookings
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database, honoring a DATABASE_URL override
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT NOT NULL,
                booking_type TEXT NOT NULL,
                country TEXT NOT NULL,
                city TEXT NOT NULL,
                address TEXT NOT NULL,
                check_in_date TEXT NOT NULL,
                check_out_date TEXT NOT NULL,
                arrival TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Pending',
                total_price REAL NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

/// Map a result row onto the domain model.
fn map_booking(row: &SqliteRow) -> Result<Booking> {
    let status: String = row.try_get("status")?;
    let status = BookingStatus::parse(&status)
        .ok_or_else(|| anyhow!("invalid status in store: {status}"))?;

    Ok(Booking {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        booking_type: row.try_get("booking_type")?,
        country: row.try_get("country")?,
        city: row.try_get("city")?,
        address: row.try_get("address")?,
        check_in_date: row.try_get("check_in_date")?,
        check_out_date: row.try_get("check_out_date")?,
        arrival: row.try_get("arrival")?,
        status,
        total_price: row.try_get("total_price")?,
    })
}

#[async_trait]
impl BookingStore for DbConnection {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings
                (first_name, last_name, phone, email, booking_type,
                 country, city, address, check_in_date, check_out_date,
                 arrival, status, total_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(&booking.phone)
        .bind(&booking.email)
        .bind(&booking.booking_type)
        .bind(&booking.country)
        .bind(&booking.city)
        .bind(&booking.address)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.arrival)
        .bind(booking.status.as_str())
        .bind(booking.total_price)
        .execute(&*self.pool)
        .await?;

        Ok(booking.clone().into_booking(result.last_insert_rowid()))
    }

    async fn get_booking(&self, booking_id: i64) -> Result<Option<Booking>> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(map_booking(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query("SELECT * FROM bookings ORDER BY check_in_date, id")
            .fetch_all(&*self.pool)
            .await?;

        rows.iter().map(map_booking).collect()
    }

    async fn find_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Booking>> {
        // Inclusive-boundary overlap: either range starts or ends inside
        // the other. ISO dates stored as TEXT compare chronologically.
        let rows = sqlx::query(
            r#"
            SELECT * FROM bookings
            WHERE status != 'Cancelled'
              AND (? IS NULL OR id != ?)
              AND ((check_in_date BETWEEN ? AND ?)
                OR (check_out_date BETWEEN ? AND ?)
                OR (? BETWEEN check_in_date AND check_out_date)
                OR (? BETWEEN check_in_date AND check_out_date))
            ORDER BY check_in_date, id
            "#,
        )
        .bind(exclude_id)
        .bind(exclude_id)
        .bind(check_in)
        .bind(check_out)
        .bind(check_in)
        .bind(check_out)
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(map_booking).collect()
    }

    async fn update_booking(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings SET
                first_name = ?, last_name = ?, phone = ?, email = ?,
                booking_type = ?, country = ?, city = ?, address = ?,
                check_in_date = ?, check_out_date = ?, arrival = ?,
                status = ?, total_price = ?
            WHERE id = ?
            "#,
        )
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(&booking.phone)
        .bind(&booking.email)
        .bind(&booking.booking_type)
        .bind(&booking.country)
        .bind(&booking.city)
        .bind(&booking.address)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.arrival)
        .bind(booking.status.as_str())
        .bind(booking.total_price)
        .bind(booking.id)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(booking_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
