// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use futures_util::TryStreamExt;
use image::codecs::webp::WebPEncoder;
use serde_json::json;

use super::{require_user, ApiError};
use crate::app_state::AppState;

const MAX_WIDTH: u32 = 960;
const MAX_HEIGHT: u32 = 540;
const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Downscale to fit within the gallery card size and re-encode as
/// WebP. Never enlarges.
fn process_image(bytes: Vec<u8>) -> Result<Vec<u8>, image::ImageError> {
    let mut img = image::load_from_memory(&bytes)?;
    if img.width() > MAX_WIDTH || img.height() > MAX_HEIGHT {
        img = img.resize(MAX_WIDTH, MAX_HEIGHT, image::imageops::FilterType::Lanczos3);
    }
    let mut out = Vec::new();
    img.write_with_encoder(WebPEncoder::new_lossless(&mut out))?;
    Ok(out)
}

pub async fn upload_screenshot(
    req: HttpRequest,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&req, &state).await?;

    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() != "file" {
            continue;
        }

        let accepted = field
            .content_type()
            .map(|mime| ACCEPTED_TYPES.contains(&mime.essence_str()))
            .unwrap_or(false);
        if !accepted {
            return Err(ApiError::Validation("Unsupported file type".to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid upload: {}", e)))?
        {
            if bytes.len() + chunk.len() > state.upload_max_bytes {
                return Err(ApiError::Validation("File too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }
        file_bytes = Some(bytes);
        break;
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::Validation("No file provided".to_string()))?;

    // Decode and re-encode off the async runtime.
    let processed = web::block(move || process_image(bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("Image task failed: {}", e)))?
        .map_err(|e| ApiError::Validation(format!("Invalid image: {}", e)))?;

    let key = format!("{}/{}.webp", user.id, Utc::now().timestamp_millis());
    let url = state
        .storage
        .store(&key, &processed)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({ "url": url })))
}
