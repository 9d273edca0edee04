// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpResponse};
use serde_json::json;

use super::ApiError;
use crate::app_state::AppState;

pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let games_count = state.stores.games.count().await?;
    let users_count = state.stores.users.count().await?;
    let tags_count = state.stores.tags.count().await?;

    Ok(HttpResponse::Ok().json(json!({
        "games_count": games_count,
        "users_count": users_count,
        "tags_count": tags_count,
    })))
}
