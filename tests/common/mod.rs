// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use miniarcade::api;
use miniarcade::app_state::AppState;
use miniarcade::config::{
    AppConfig, AuthConfig, Config, DatabaseConfig, GithubConfig, JwtConfig, LoggingConfig,
    ServerConfig, UploadConfig, ValidatedConfig,
};
use miniarcade::db;
use miniarcade::iam::{IdentityError, IdentityProvider, Principal, SessionMiddlewareFactory};
use miniarcade::store::{CreateGameInput, CreateUserInput, GameRecord, UserRecord};

/// Identity provider that hands out a pre-configured principal instead
/// of calling GitHub. `set_failure` makes the next exchange fail.
pub struct StubIdentityProvider {
    principal: Mutex<Option<Principal>>,
    fail: Mutex<bool>,
}

impl StubIdentityProvider {
    pub fn new() -> Self {
        Self {
            principal: Mutex::new(None),
            fail: Mutex::new(false),
        }
    }

    pub fn set_principal(&self, principal: Principal) {
        *self.principal.lock().unwrap() = Some(principal);
    }

    pub fn set_failure(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn exchange_code(&self, _code: &str) -> Result<Principal, IdentityError> {
        if *self.fail.lock().unwrap() {
            return Err(IdentityError::ExchangeFailed(
                "stubbed failure".to_string(),
            ));
        }
        self.principal
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| IdentityError::ExchangeFailed("no principal configured".to_string()))
    }
}

pub struct TestHarness {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub identity: Arc<StubIdentityProvider>,
    upload_dir: tempfile::TempDir,
}

impl TestHarness {
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("upload dir");
        let config = Arc::new(build_config(upload_dir.path().to_path_buf()));
        let db = db::connect("sqlite::memory:").await.expect("database");
        let identity = Arc::new(StubIdentityProvider::new());
        let app_state = Arc::new(AppState::with_identity_provider(
            db,
            &config,
            identity.clone(),
        ));

        Self {
            config,
            app_state,
            identity,
            upload_dir,
        }
    }

    pub async fn seed_user(&self, github_id: &str, username: &str) -> UserRecord {
        self.app_state
            .stores
            .users
            .create(CreateUserInput {
                github_id: github_id.to_string(),
                username: username.to_string(),
                avatar_url: Some(format!("https://avatars.example/{}", username)),
            })
            .await
            .expect("seed user")
    }

    pub async fn seed_game(&self, user: &UserRecord, title: &str) -> GameRecord {
        self.app_state
            .stores
            .games
            .create(CreateGameInput {
                user_id: user.id,
                title: title.to_string(),
                description: format!("{} description", title),
                screenshot_url: "https://cdn.example/shot.webp".to_string(),
                vercel_url: "https://game.example".to_string(),
                github_url: None,
                qiita_url: None,
            })
            .await
            .expect("seed game")
    }

    /// Session cookie for a seeded user, as the browser would carry it
    /// after the OAuth callback.
    pub fn auth_cookie(&self, user: &UserRecord) -> actix_web::cookie::Cookie<'static> {
        let principal = Principal {
            external_id: user.github_id.clone(),
            username: Some(user.username.clone()),
            display_name: None,
            avatar_url: user.avatar_url.clone(),
        };
        let token = self
            .app_state
            .jwt
            .create_token(&principal)
            .expect("jwt token");
        self.app_state.jwt.create_auth_cookie(&token).into_owned()
    }

    /// Cookie for a session whose user row does not exist locally.
    pub fn orphan_cookie(&self, github_id: &str) -> actix_web::cookie::Cookie<'static> {
        let principal = Principal {
            external_id: github_id.to_string(),
            username: Some("ghost".to_string()),
            display_name: None,
            avatar_url: None,
        };
        let token = self
            .app_state
            .jwt
            .create_token(&principal)
            .expect("jwt token");
        self.app_state.jwt.create_auth_cookie(&token).into_owned()
    }
}

fn build_config(upload_dir: std::path::PathBuf) -> ValidatedConfig {
    Config {
        server: ServerConfig::default(),
        app: AppConfig::default(),
        logging: LoggingConfig::default(),
        database: DatabaseConfig::default(),
        github: GithubConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
        },
        auth: AuthConfig {
            jwt: JwtConfig {
                secret: "test-secret-0123456789abcdef".to_string(),
                issuer: "miniarcade-test".to_string(),
                audience: "miniarcade-test".to_string(),
                expiration_hours: 2,
                cookie_name: "miniarcade_auth".to_string(),
            },
        },
        upload: UploadConfig {
            dir: upload_dir,
            public_base_url: "/screenshots".to_string(),
            max_file_size_mb: 5,
        },
    }
    .validate()
    .expect("test config")
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(harness.app_state.clone()))
        .wrap(SessionMiddlewareFactory)
        .configure(api::configure)
        .configure(api::auth::configure)
}
