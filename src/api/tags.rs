// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{require_user, ApiError};
use crate::app_state::AppState;

#[derive(Deserialize)]
pub(crate) struct ListParams {
    q: Option<String>,
    limit: Option<u64>,
}

pub async fn list_tags(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    let tags = state
        .stores
        .tags
        .list(query, params.limit.unwrap_or(50))
        .await?;
    Ok(HttpResponse::Ok().json(tags))
}

#[derive(Deserialize)]
pub(crate) struct CreateTagBody {
    name: Option<String>,
}

pub async fn create_tag(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateTagBody>,
) -> Result<HttpResponse, ApiError> {
    require_user(&req, &state).await?;

    let name = body.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() || name.chars().count() > 50 {
        return Err(ApiError::Validation(
            "Tag name must be 1-50 characters".to_string(),
        ));
    }

    if let Some(existing) = state.stores.tags.find_by_name(&name).await? {
        return Ok(HttpResponse::Ok().json(json!({
            "id": existing.id,
            "name": existing.name,
            "exists": true,
        })));
    }

    let tag = state.stores.tags.create(&name).await?;
    Ok(HttpResponse::Created().json(json!({
        "id": tag.id,
        "name": tag.name,
        "exists": false,
    })))
}
