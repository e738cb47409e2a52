mod access;
mod token;

pub use access::{AccessError, ParticipantAuthorizer, SqliteParticipantDirectory, StaticAllowList};
pub use token::{SigningCause, SigningCredentials, TokenError, TokenIssuer, TOKEN_TTL_SECS};
