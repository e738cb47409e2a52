use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::Participant;

/// Creates the participant table and seeds it on first start.
pub async fn init_db(pool: &SqlitePool, seed: &[String]) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS participants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identity TEXT NOT NULL UNIQUE CHECK (identity <> '')
        )",
    )
    .execute(pool)
    .await?;

    if Participant::count(pool).await? == 0 {
        let mut seeded = 0;
        for identity in seed.iter().filter(|s| !s.is_empty()) {
            Participant::create(pool, identity).await?;
            seeded += 1;
        }
        info!(count = seeded, "Seeded participant directory");
    }
    Ok(())
}
