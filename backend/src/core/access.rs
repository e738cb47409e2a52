use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::Participant;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("participant '{participant}' is not allowed")]
    Denied {
        participant: String,
        allowed: Vec<String>,
    },

    #[error("participant lookup failed: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for AccessError {
    fn from(err: sqlx::Error) -> Self {
        AccessError::Backend(err.to_string())
    }
}

/// Decides whether a participant identity may receive a room token.
#[async_trait]
pub trait ParticipantAuthorizer: Send + Sync {
    async fn authorize(&self, participant: &str) -> Result<(), AccessError>;
}

/// Fixed set of identities loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    allowed: BTreeSet<String>,
}

impl StaticAllowList {
    pub fn new<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: identities
                .into_iter()
                .map(Into::<String>::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[async_trait]
impl ParticipantAuthorizer for StaticAllowList {
    async fn authorize(&self, participant: &str) -> Result<(), AccessError> {
        if self.allowed.contains(participant) {
            Ok(())
        } else {
            Err(AccessError::Denied {
                participant: participant.to_string(),
                allowed: self.allowed.iter().cloned().collect(),
            })
        }
    }
}

/// Identities stored in the `participants` table.
#[derive(Debug, Clone)]
pub struct SqliteParticipantDirectory {
    pool: SqlitePool,
}

impl SqliteParticipantDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantAuthorizer for SqliteParticipantDirectory {
    async fn authorize(&self, participant: &str) -> Result<(), AccessError> {
        match Participant::read_by_identity(&self.pool, participant).await? {
            Some(_) => Ok(()),
            // Membership stays private; denials carry no candidate list.
            None => Err(AccessError::Denied {
                participant: participant.to_string(),
                allowed: Vec::new(),
            }),
        }
    }
}
