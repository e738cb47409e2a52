use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub identity: String,
}

impl Participant {
    pub async fn read_by_identity(
        pool: &SqlitePool,
        identity: &str,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, identity FROM participants WHERE identity = ?")
            .bind(identity)
            .fetch_optional(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM participants")
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, identity: &str) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO participants (identity) VALUES (?) RETURNING id, identity",
        )
        .bind(identity)
        .fetch_one(pool)
        .await
    }
}
