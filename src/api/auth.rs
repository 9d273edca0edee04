// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::ApiError;
use crate::app_state::AppState;
use crate::iam::resolve_or_create_user;
use crate::storage::StorageError;

const AUTH_ERROR_PATH: &str = "/auth/auth-code-error";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/callback", web::get().to(auth_callback))
        .route("/auth/logout", web::post().to(logout))
        .route(
            "/screenshots/{user_id}/{filename}",
            web::get().to(serve_screenshot),
        );
}

/// Only same-site relative targets are honored; anything else falls
/// back to the root so the callback cannot be used as an open
/// redirect.
fn sanitize_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next,
        _ => "/",
    }
}

#[derive(Deserialize)]
pub(crate) struct CallbackParams {
    code: Option<String>,
    next: Option<String>,
}

pub async fn auth_callback(
    state: web::Data<AppState>,
    params: web::Query<CallbackParams>,
) -> HttpResponse {
    let redirect_to = |location: &str| {
        HttpResponse::Found()
            .insert_header(("Location", location.to_string()))
            .finish()
    };

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return redirect_to(AUTH_ERROR_PATH);
    };

    let principal = match state.identity.exchange_code(code).await {
        Ok(principal) => principal,
        Err(e) => {
            log::error!("OAuth code exchange failed: {}", e);
            return redirect_to(AUTH_ERROR_PATH);
        }
    };

    // The local user record is best-effort at this point; a failed
    // insert is retried on the next authenticated request.
    resolve_or_create_user(state.stores.users.as_ref(), &principal).await;

    let token = match state.jwt.create_token(&principal) {
        Ok(token) => token,
        Err(e) => {
            log::error!("Session token creation failed: {}", e);
            return redirect_to(AUTH_ERROR_PATH);
        }
    };

    let next = sanitize_next(params.next.as_deref());
    HttpResponse::Found()
        .insert_header(("Location", next.to_string()))
        .cookie(state.jwt.create_auth_cookie(&token))
        .finish()
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.jwt.create_logout_cookie())
        .json(json!({ "success": true }))
}

pub async fn serve_screenshot(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_id, filename) = path.into_inner();
    let key = format!("{}/{}", user_id, filename);

    let bytes = state.storage.load(&key).await.map_err(|e| match e {
        StorageError::InvalidKey(_) => ApiError::NotFound("Not found".to_string()),
        StorageError::Io(e) => ApiError::Internal(e.to_string()),
    })?;

    match bytes {
        Some(bytes) => Ok(HttpResponse::Ok()
            .content_type("image/webp")
            .body(bytes)),
        None => Err(ApiError::NotFound("Not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_param_only_allows_relative_paths() {
        assert_eq!(sanitize_next(None), "/");
        assert_eq!(sanitize_next(Some("/games/new")), "/games/new");
        assert_eq!(sanitize_next(Some("https://evil.example")), "/");
        assert_eq!(sanitize_next(Some("//evil.example")), "/");
        assert_eq!(sanitize_next(Some("")), "/");
    }
}
