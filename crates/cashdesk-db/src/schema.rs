use anyhow::Result;
use sqlx::Executor;

use crate::Connection;

/// Install the database schema. Installing the schema
/// on an existing database leaves it untouched.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    tracing::debug!("installing database schema");
    (&mut *conn).execute(schema_data).await?;
    Ok(())
}
