// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::Principal;
use crate::config::ValidatedConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (external provider id)
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration
    pub iss: String,
    pub aud: String,
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal {
            external_id: self.sub.clone(),
            username: self.username.clone(),
            display_name: None,
            avatar_url: self.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum JwtError {
    TokenCreationError(String),
    TokenVerificationError(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenCreationError(msg) => write!(f, "Token creation error: {}", msg),
            JwtError::TokenVerificationError(msg) => write!(f, "Token verification error: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

pub struct JwtService {
    secret: String,
    issuer: String,
    audience: String,
    expiration_hours: u64,
    cookie_name: String,
    is_localhost: bool,
}

impl JwtService {
    pub fn new(config: &ValidatedConfig) -> Self {
        let jwt = &config.auth.jwt;
        JwtService {
            secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            expiration_hours: jwt.expiration_hours,
            cookie_name: jwt.cookie_name.clone(),
            is_localhost: config.is_localhost(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Create a JWT token for a signed-in principal
    pub fn create_token(&self, principal: &Principal) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours as i64);

        let claims = Claims {
            sub: principal.external_id.clone(),
            username: principal.username.clone(),
            avatar_url: principal.avatar_url.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| JwtError::TokenCreationError(e.to_string()))?;

        Ok(token)
    }

    /// Verify a JWT token and return claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
        .map_err(|e| JwtError::TokenVerificationError(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Create a secure HTTP-only cookie with the JWT token
    pub fn create_auth_cookie<'a>(&self, token: &str) -> actix_web::cookie::Cookie<'a> {
        let expiration = Utc::now() + Duration::hours(self.expiration_hours as i64);

        let expires = match actix_web::cookie::time::OffsetDateTime::from_unix_timestamp(
            expiration.timestamp(),
        ) {
            Ok(val) => val,
            Err(e) => {
                log::error!(
                    "Failed to convert expiration timestamp for auth cookie: {}",
                    e
                );
                actix_web::cookie::time::OffsetDateTime::UNIX_EPOCH
            }
        };

        actix_web::cookie::Cookie::build(self.cookie_name.clone(), token.to_string())
            .path("/")
            // Allow plain HTTP when only loopback is served
            .secure(!self.is_localhost)
            .http_only(true)
            .same_site(actix_web::cookie::SameSite::Lax)
            .expires(expires)
            .finish()
    }

    /// Create a cookie for logout (removes the JWT)
    pub fn create_logout_cookie<'a>(&self) -> actix_web::cookie::Cookie<'a> {
        actix_web::cookie::Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .secure(!self.is_localhost)
            .http_only(true)
            .same_site(actix_web::cookie::SameSite::Lax)
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .expires(actix_web::cookie::time::OffsetDateTime::UNIX_EPOCH)
            .finish()
    }
}
