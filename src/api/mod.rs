// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpRequest};

use crate::app_state::AppState;
use crate::iam::AuthRequest;
use crate::store::UserRecord;

pub mod auth;
mod error;
mod games;
mod likes;
mod stats;
mod tags;
mod upload;
mod users;

pub use error::ApiError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Extractor failures must render the same `{"error": msg}` body as
    // handler errors. A malformed path id reads as a missing resource;
    // bad JSON or query strings are validation failures.
    cfg.app_data(web::PathConfig::default().error_handler(|_err, _req| {
        ApiError::NotFound("Not found".to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid query parameters: {}", err)).into()
    }))
    .service(
        web::scope("/api")
            .route("/games", web::get().to(games::list_games))
            .route("/games", web::post().to(games::create_game))
            .route("/games/{id}", web::get().to(games::get_game))
            .route("/games/{id}", web::put().to(games::update_game))
            .route("/games/{id}", web::delete().to(games::delete_game))
            .route("/games/{id}/like", web::post().to(likes::like_game))
            .route("/games/{id}/like", web::delete().to(likes::unlike_game))
            .route("/tags", web::get().to(tags::list_tags))
            .route("/tags", web::post().to(tags::create_tag))
            .route("/users/me", web::get().to(users::get_me))
            .route("/users/{id}", web::get().to(users::get_user))
            .route("/users/{id}/games", web::get().to(users::list_user_games))
            .route("/stats", web::get().to(stats::get_stats))
            .route("/upload", web::post().to(upload::upload_screenshot)),
    );
}

/// Resolve the authenticated caller to a local user record.
/// No session yields 401; a session whose user row was never created
/// yields 404, matching the handler taxonomy.
pub(crate) async fn require_user(
    req: &HttpRequest,
    state: &AppState,
) -> Result<UserRecord, ApiError> {
    let principal = req.principal().ok_or(ApiError::Unauthorized)?;
    state
        .stores
        .users
        .find_by_github_id(&principal.external_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Like `require_user` but for read endpoints where anonymous access
/// is fine. An unresolvable session reads as anonymous.
pub(crate) async fn current_user(
    req: &HttpRequest,
    state: &AppState,
) -> Result<Option<UserRecord>, ApiError> {
    let Some(principal) = req.principal() else {
        return Ok(None);
    };
    Ok(state
        .stores
        .users
        .find_by_github_id(&principal.external_id)
        .await?)
}
