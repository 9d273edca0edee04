// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{current_user, require_user, ApiError};
use crate::app_state::AppState;
use crate::store::{CreateGameInput, GameDetail, GameListQuery, StoreError, UpdateGameInput};

#[derive(Serialize)]
pub(crate) struct GameView {
    #[serde(flatten)]
    pub detail: GameDetail,
    pub is_liked: bool,
}

#[derive(Deserialize)]
pub(crate) struct ListParams {
    search: Option<String>,
    /// Comma-separated tag names.
    tags: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

fn parse_tags_param(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?;
    let names: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Mark the caller's liked games on an enriched page.
pub(crate) async fn attach_is_liked(
    req: &HttpRequest,
    state: &AppState,
    details: Vec<GameDetail>,
) -> Result<Vec<GameView>, ApiError> {
    let liked = match current_user(req, state).await? {
        Some(user) => {
            let ids: Vec<Uuid> = details.iter().map(|game| game.id).collect();
            state.stores.likes.liked_game_ids(user.id, &ids).await?
        }
        None => Vec::new(),
    };
    Ok(details
        .into_iter()
        .map(|detail| GameView {
            is_liked: liked.contains(&detail.id),
            detail,
        })
        .collect())
}

pub async fn list_games(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let query = GameListQuery {
        search: params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        tags: parse_tags_param(params.tags.as_deref()),
        offset: params.offset.unwrap_or(0),
        limit: params.limit.unwrap_or(20),
    };

    let details = state.stores.games.list(&query).await?;
    let views = attach_is_liked(&req, &state, details).await?;
    Ok(HttpResponse::Ok().json(views))
}

#[derive(Deserialize)]
pub(crate) struct CreateGameBody {
    title: Option<String>,
    description: Option<String>,
    screenshot_url: Option<String>,
    vercel_url: Option<String>,
    github_url: Option<String>,
    qiita_url: Option<String>,
    tags: Option<Vec<String>>,
}

/// Resolve tag names to rows (creating missing ones) and link them to
/// the game. Failures are logged and skipped so the submission itself
/// still succeeds; the game may end up with fewer tags than requested.
/// A duplicate-name conflict from a concurrent create is reported the
/// same way, not silently adopted.
pub(crate) async fn resolve_and_link_tags(
    tag_store: &dyn crate::store::TagStore,
    game_id: Uuid,
    names: &[String],
) {
    let mut tag_ids = Vec::with_capacity(names.len());
    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        let found = match tag_store.find_by_name(name).await {
            Ok(found) => found,
            Err(e) => {
                log::error!("Tag lookup failed for '{}': {}", name, e);
                continue;
            }
        };
        let tag = match found {
            Some(tag) => tag,
            None => match tag_store.create(name).await {
                Ok(tag) => tag,
                Err(e) => {
                    log::error!("Tag creation failed for '{}': {}", name, e);
                    continue;
                }
            },
        };
        tag_ids.push(tag.id);
    }

    if let Err(e) = tag_store.link_to_game(game_id, &tag_ids).await {
        log::error!("Tag linking failed for game {}: {}", game_id, e);
    }
}

pub async fn create_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateGameBody>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    let body = body.into_inner();

    let required = [
        body.title.as_deref(),
        body.description.as_deref(),
        body.screenshot_url.as_deref(),
        body.vercel_url.as_deref(),
    ];
    if required.iter().any(|f| f.map_or(true, |s| s.trim().is_empty())) {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    let game = state
        .stores
        .games
        .create(CreateGameInput {
            user_id: user.id,
            title: body.title.unwrap_or_default(),
            description: body.description.unwrap_or_default(),
            screenshot_url: body.screenshot_url.unwrap_or_default(),
            vercel_url: body.vercel_url.unwrap_or_default(),
            github_url: body.github_url,
            qiita_url: body.qiita_url,
        })
        .await?;

    if let Some(tags) = body.tags.as_deref() {
        resolve_and_link_tags(state.stores.tags.as_ref(), game.id, tags).await;
    }

    Ok(HttpResponse::Created().json(game))
}

pub async fn get_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let game_id = path.into_inner();
    let detail = state
        .stores
        .games
        .find_by_id(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;
    let mut views = attach_is_liked(&req, &state, vec![detail]).await?;
    let view = views.pop().ok_or_else(|| {
        ApiError::Internal("Game view construction failed".to_string())
    })?;
    Ok(HttpResponse::Ok().json(view))
}

/// Shared ownership gate for mutations: 404 when the game is missing,
/// 403 when the caller is not the owner.
async fn require_owner(
    state: &AppState,
    game_id: Uuid,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let owner = state
        .stores
        .games
        .owner_id(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;
    if owner != user_id {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }
    Ok(())
}

#[derive(Deserialize)]
pub(crate) struct UpdateGameBody {
    title: Option<String>,
    description: Option<String>,
    screenshot_url: Option<String>,
    vercel_url: Option<String>,
    github_url: Option<String>,
    qiita_url: Option<String>,
    tags: Option<Vec<String>>,
}

pub async fn update_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGameBody>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    let game_id = path.into_inner();
    require_owner(&state, game_id, user.id).await?;

    let body = body.into_inner();
    let game = state
        .stores
        .games
        .update(
            game_id,
            UpdateGameInput {
                title: body.title,
                description: body.description,
                screenshot_url: body.screenshot_url,
                vercel_url: body.vercel_url,
                github_url: body.github_url,
                qiita_url: body.qiita_url,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Game not found".to_string()),
            other => other.into(),
        })?;

    // A supplied tag list replaces the existing associations.
    if let Some(tags) = body.tags.as_deref() {
        if let Err(e) = state.stores.tags.unlink_from_game(game_id).await {
            log::error!("Tag unlinking failed for game {}: {}", game_id, e);
        } else {
            resolve_and_link_tags(state.stores.tags.as_ref(), game_id, tags).await;
        }
    }

    Ok(HttpResponse::Ok().json(game))
}

pub async fn delete_game(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;
    let game_id = path.into_inner();
    require_owner(&state, game_id, user.id).await?;

    state
        .stores
        .games
        .delete(game_id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => ApiError::NotFound("Game not found".to_string()),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::store::{TagRecord, TagStore};

    #[test]
    fn tags_param_splits_trims_and_drops_empties() {
        assert_eq!(
            parse_tags_param(Some("React, Rust ,,  ")),
            Some(vec!["React".to_string(), "Rust".to_string()])
        );
        assert_eq!(parse_tags_param(Some(" , ")), None);
        assert_eq!(parse_tags_param(None), None);
    }

    /// Tag store where every create loses the duplicate-name race.
    struct RacingTagStore {
        linked: Mutex<Option<Vec<Uuid>>>,
    }

    #[async_trait]
    impl TagStore for RacingTagStore {
        async fn list(
            &self,
            _query: Option<&str>,
            _limit: u64,
        ) -> Result<Vec<TagRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_by_name(&self, _name: &str) -> Result<Option<TagRecord>, StoreError> {
            Ok(None)
        }

        async fn create(&self, name: &str) -> Result<TagRecord, StoreError> {
            Err(StoreError::Conflict(format!(
                "tag '{}' already exists",
                name
            )))
        }

        async fn link_to_game(
            &self,
            _game_id: Uuid,
            tag_ids: &[Uuid],
        ) -> Result<(), StoreError> {
            *self.linked.lock().unwrap() = Some(tag_ids.to_vec());
            Ok(())
        }

        async fn unlink_from_game(&self, _game_id: Uuid) -> Result<(), StoreError> {
            Ok(())
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn tag_create_conflict_is_skipped_not_adopted() {
        let store = RacingTagStore {
            linked: Mutex::new(None),
        };
        resolve_and_link_tags(&store, Uuid::new_v4(), &["Puzzle".to_string()]).await;

        let linked = store.linked.lock().unwrap();
        assert_eq!(linked.as_deref(), Some(&[][..]));
    }
}
