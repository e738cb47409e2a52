use serde::{Deserialize, Serialize};

/// Room permissions carried in the `video` claim.
///
/// Keys are camelCase and omitted when unset, which is what LiveKit servers
/// expect when they decode the grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub room_join: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub room: String,
}

impl VideoGrant {
    pub fn join(room: &str) -> Self {
        Self {
            room_join: true,
            room: room.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Signing key ID.
    pub iss: String,
    /// Participant identity.
    pub sub: String,
    pub jti: String,
    pub nbf: i64,
    pub exp: i64,
    pub video: VideoGrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_serializes_camel_case() {
        let value = serde_json::to_value(VideoGrant::join("demo-room")).expect("serialize");
        assert_eq!(value, serde_json::json!({"roomJoin": true, "room": "demo-room"}));
    }

    #[test]
    fn test_grant_omits_unset_fields() {
        let grant = VideoGrant {
            room_join: false,
            room: String::new(),
        };
        let value = serde_json::to_value(grant).expect("serialize");
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_grant_deserializes_missing_fields() {
        let grant: VideoGrant = serde_json::from_str(r#"{"room":"lobby"}"#).expect("deserialize");
        assert!(!grant.room_join);
        assert_eq!(grant.room, "lobby");
    }
}
