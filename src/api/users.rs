// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::games::attach_is_liked;
use super::{require_user, ApiError};
use crate::app_state::AppState;
use crate::store::UserProfile;

#[derive(Serialize)]
struct ProfileResponse {
    #[serde(flatten)]
    profile: UserProfile,
    games_count: u64,
    total_likes: u64,
}

pub async fn get_me(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Public profile with aggregate counters: how many games the user has
/// published and how many likes those games have received in total.
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let profile = state
        .stores
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let games_count = state.stores.games.count_by_user(user_id).await?;
    let game_ids = state.stores.games.list_ids_by_user(user_id).await?;
    let total_likes = state.stores.likes.count_by_games(&game_ids).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile,
        games_count,
        total_likes,
    }))
}

#[derive(Deserialize)]
pub(crate) struct ListParams {
    limit: Option<u64>,
    offset: Option<u64>,
}

pub async fn list_user_games(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    if state.stores.users.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let details = state
        .stores
        .games
        .list_by_user(
            user_id,
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(20),
        )
        .await?;
    let views = attach_is_liked(&req, &state, details).await?;
    Ok(HttpResponse::Ok().json(views))
}
