//! Database bootstrap: ensure the database exists and create the tables.

use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// DDL for the three tables. Unique constraints are named so a violation can
/// be mapped back to the offending field; foreign keys stay NO ACTION because
/// the repositories delete dependent bookings themselves, inside the same
/// transaction as the owning row.
const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customer (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        CONSTRAINT uq_customer_email UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS flight (
        id BIGSERIAL PRIMARY KEY,
        number TEXT NOT NULL,
        point_of_departure TEXT NOT NULL,
        destination TEXT NOT NULL,
        CONSTRAINT uq_flight_number UNIQUE (number),
        CONSTRAINT ck_flight_distinct_airports CHECK (destination <> point_of_departure)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS booking (
        id BIGSERIAL PRIMARY KEY,
        customer_id BIGINT NOT NULL REFERENCES customer (id),
        flight_id BIGINT NOT NULL REFERENCES flight (id),
        date DATE NOT NULL,
        CONSTRAINT uq_booking_natural_key UNIQUE (customer_id, flight_id, date)
    )
    "#,
];

/// Create the application tables if they do not exist. Idempotent.
pub async fn apply_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to
/// the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {e}")))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{base}postgres");
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
