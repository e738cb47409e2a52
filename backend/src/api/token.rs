use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing, Json, Router,
};
use tracing::{debug, info};

use crate::models::{AppError, AppState, TokenResponse};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/{participant}", routing::get(get_token))
}

async fn get_token(
    State(app_state): State<Arc<AppState>>,
    Path(participant): Path<String>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!(%participant, "Token requested");
    app_state.authorizer.authorize(&participant).await?;

    let token = app_state.issuer.issue(&app_state.room_id, &participant)?;

    info!(
        room_id = %app_state.room_id,
        %participant,
        ws_url = %app_state.ws_url,
        "Issued room token"
    );

    Ok(Json(TokenResponse {
        room_id: app_state.room_id.clone(),
        token,
        ws_url: app_state.ws_url.clone(),
    }))
}
