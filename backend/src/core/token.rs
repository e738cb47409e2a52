use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::models::{AccessClaims, VideoGrant};

/// How long an issued token stays valid, in seconds.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token request: {0}")]
    InvalidRequest(&'static str),

    #[error("failed to sign token: {0}")]
    SigningFailure(#[source] SigningCause),

    #[error("token verification failed: {0}")]
    Verification(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Error)]
pub enum SigningCause {
    #[error("signing credentials are missing")]
    MissingCredentials,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Key ID and shared secret used to sign room tokens.
#[derive(Debug)]
pub struct SigningCredentials {
    key_id: String,
    secret: SecretString,
}

impl SigningCredentials {
    pub fn new(key_id: impl Into<String>, secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            secret,
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    fn is_complete(&self) -> bool {
        !self.key_id.is_empty() && !self.secret.expose_secret().is_empty()
    }
}

/// Signs room-join tokens for the media server.
///
/// Holds no mutable state; clones share the same credentials.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credentials: Arc<SigningCredentials>,
}

impl TokenIssuer {
    pub fn new(credentials: Arc<SigningCredentials>) -> Self {
        Self { credentials }
    }

    pub fn key_id(&self) -> &str {
        self.credentials.key_id()
    }

    pub fn issue(&self, room_id: &str, participant_id: &str) -> Result<String, TokenError> {
        self.issue_at(room_id, participant_id, Utc::now())
    }

    /// Issues a token whose validity window starts at `now`.
    pub fn issue_at(
        &self,
        room_id: &str,
        participant_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if room_id.is_empty() {
            return Err(TokenError::InvalidRequest("room id must not be empty"));
        }
        if participant_id.is_empty() {
            return Err(TokenError::InvalidRequest("participant id must not be empty"));
        }
        if !self.credentials.is_complete() {
            return Err(TokenError::SigningFailure(SigningCause::MissingCredentials));
        }

        let claims = AccessClaims {
            iss: self.credentials.key_id.clone(),
            sub: participant_id.to_string(),
            jti: participant_id.to_string(),
            nbf: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            video: VideoGrant::join(room_id),
        };

        let key = EncodingKey::from_secret(self.credentials.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| TokenError::SigningFailure(SigningCause::Jwt(e)))
    }

    /// Decodes a token the way the media server does: HS256 signature,
    /// issuer, expiry and not-before.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.credentials.key_id.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_nbf = true;

        let key = DecodingKey::from_secret(self.credentials.secret.expose_secret().as_bytes());
        decode::<AccessClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ID: &str = "devkey";
    const SECRET: &str = "devsecret123456789012345678901234567890";

    fn issuer_with(key_id: &str, secret: &str) -> TokenIssuer {
        TokenIssuer::new(Arc::new(SigningCredentials::new(
            key_id,
            SecretString::from(secret),
        )))
    }

    fn issuer() -> TokenIssuer {
        issuer_with(KEY_ID, SECRET)
    }

    #[test]
    fn test_issue_returns_compact_jwt() {
        let token = issuer().issue("demo-room", "participant1").expect("issue");

        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issued_claims_match_request() {
        let issuer = issuer();
        let token = issuer.issue("demo-room", "participant1").expect("issue");
        let claims = issuer.verify(&token).expect("verify");

        assert_eq!(claims.iss, KEY_ID);
        assert_eq!(claims.sub, "participant1");
        assert_eq!(claims.jti, "participant1");
        assert!(claims.video.room_join);
        assert_eq!(claims.video.room, "demo-room");
    }

    #[test]
    fn test_expiry_is_one_day_after_issuance() {
        let issuer = issuer();
        let before = Utc::now().timestamp();
        let token = issuer.issue("demo-room", "participant2").expect("issue");
        let after = Utc::now().timestamp();
        let claims = issuer.verify(&token).expect("verify");

        assert!(claims.nbf >= before && claims.nbf <= after);
        assert_eq!(claims.exp - claims.nbf, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_header_is_hs256_jwt() {
        let token = issuer().issue("demo-room", "participant1").expect("issue");
        let header = jsonwebtoken::decode_header(&token).expect("header");

        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_secret_not_in_claims() {
        let issuer = issuer();
        let token = issuer.issue("demo-room", "participant1").expect("issue");
        let claims = issuer.verify(&token).expect("verify");
        let json = serde_json::to_string(&claims).expect("serialize");

        assert!(!json.contains(SECRET));
    }

    #[test]
    fn test_tokens_at_different_instants_differ() {
        let issuer = issuer();
        let now = Utc::now();
        let first = issuer
            .issue_at("demo-room", "participant1", now - Duration::seconds(1))
            .expect("issue");
        let second = issuer
            .issue_at("demo-room", "participant1", now)
            .expect("issue");

        assert_ne!(first, second);

        let a = issuer.verify(&first).expect("verify");
        let b = issuer.verify(&second).expect("verify");
        assert_eq!(a.sub, b.sub);
        assert_eq!(a.iss, b.iss);
        assert_eq!(a.video, b.video);
        assert_eq!(b.nbf - a.nbf, 1);
    }

    #[test]
    fn test_empty_secret_is_signing_failure() {
        let result = issuer_with(KEY_ID, "").issue("demo-room", "participant1");
        assert!(matches!(
            result,
            Err(TokenError::SigningFailure(SigningCause::MissingCredentials))
        ));
    }

    #[test]
    fn test_empty_key_id_is_signing_failure() {
        let result = issuer_with("", SECRET).issue("demo-room", "participant1");
        assert!(matches!(
            result,
            Err(TokenError::SigningFailure(SigningCause::MissingCredentials))
        ));
    }

    #[test]
    fn test_empty_room_is_rejected() {
        let result = issuer().issue("", "x");
        assert!(matches!(result, Err(TokenError::InvalidRequest(_))));
    }

    #[test]
    fn test_empty_participant_is_rejected() {
        let result = issuer().issue("demo-room", "");
        assert!(matches!(result, Err(TokenError::InvalidRequest(_))));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let token = issuer().issue("demo-room", "participant1").expect("issue");
        let other = issuer_with(KEY_ID, "another-secret-another-secret-another");

        assert!(matches!(
            other.verify(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_verify_rejects_other_issuer() {
        let token = issuer().issue("demo-room", "participant1").expect("issue");
        let other = issuer_with("otherkey", SECRET);

        assert!(matches!(
            other.verify(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let issuer = issuer();
        let token = issuer
            .issue_at("demo-room", "participant1", Utc::now() - Duration::hours(25))
            .expect("issue");

        assert!(matches!(
            issuer.verify(&token),
            Err(TokenError::Verification(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let debug = format!("{:?}", issuer());
        assert!(!debug.contains(SECRET));
        assert!(debug.contains(KEY_ID));
    }

    #[test]
    fn test_concurrent_issuance() {
        let issuer = issuer();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let issuer = issuer.clone();
                std::thread::spawn(move || issuer.issue("demo-room", &format!("participant{i}")))
            })
            .collect();

        for handle in handles {
            let token = handle.join().expect("thread").expect("issue");
            assert!(!token.is_empty());
        }
    }
}
