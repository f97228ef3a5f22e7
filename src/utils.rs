//! Helper functions could be used in api/, repo/, ...

use crate::config;
use chrono::{NaiveDate, Utc};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::str::FromStr;

pub async fn setup_sqlite_db_pool() -> anyhow::Result<SqlitePool> {
    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

/// Today's calendar date as seen from UTC; the reference point for
/// "booking_date must not be in the past".
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
