use std::sync::Arc;

use crate::core::{ParticipantAuthorizer, TokenIssuer};

mod error;
mod participant;
mod token_claims;
mod token_response;

pub use error::{AppError, ErrorResponse};
pub use participant::Participant;
pub use token_claims::{AccessClaims, VideoGrant};
pub use token_response::TokenResponse;

#[derive(Clone)]
pub struct AppState {
    pub issuer: TokenIssuer,
    pub authorizer: Arc<dyn ParticipantAuthorizer>,
    pub room_id: String,
    pub ws_url: String,
    pub static_dir: String,
}
