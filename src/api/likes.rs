// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use super::{require_user, ApiError};
use crate::app_state::AppState;
use crate::store::StoreError;

async fn require_game(state: &AppState, game_id: Uuid) -> Result<(), ApiError> {
    if !state.stores.games.exists(game_id).await? {
        return Err(ApiError::NotFound("Game not found".to_string()));
    }
    Ok(())
}

pub async fn like_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    let game_id = path.into_inner();
    require_game(&state, game_id).await?;

    if state.stores.likes.exists(user.id, game_id).await? {
        return Err(ApiError::Validation("Already liked".to_string()));
    }
    state
        .stores
        .likes
        .create(user.id, game_id)
        .await
        .map_err(|e| match e {
            // Concurrent double-tap between check and insert
            StoreError::Conflict(_) => ApiError::Validation("Already liked".to_string()),
            other => other.into(),
        })?;

    let likes_count = state.stores.likes.count_by_game(game_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "likes_count": likes_count })))
}

pub async fn unlike_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    let game_id = path.into_inner();
    require_game(&state, game_id).await?;

    // Unliking something never liked is a no-op, not an error.
    state.stores.likes.delete(user.id, game_id).await?;

    let likes_count = state.stores.likes.count_by_game(game_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "likes_count": likes_count })))
}
