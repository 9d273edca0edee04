// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{IdentityError, Principal};
use crate::config::GithubConfig;

const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const USER_AGENT: &str = concat!("miniarcade/", env!("CARGO_PKG_VERSION"));

/// Turns an OAuth authorization code into a provider identity.
/// Abstracted so tests can sign in without talking to GitHub.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<Principal, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: u64,
    login: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

pub struct GitHubIdentityProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    user_url: String,
}

impl GitHubIdentityProvider {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: TOKEN_URL.to_string(),
            user_url: USER_URL.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GitHubIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<Principal, IdentityError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
        ];
        let token: TokenResponse = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| IdentityError::ExchangeFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| IdentityError::ExchangeFailed(e.to_string()))?;

        let access_token = match token.access_token {
            Some(access_token) => access_token,
            None => {
                let detail = token
                    .error_description
                    .or(token.error)
                    .unwrap_or_else(|| "no access token in response".to_string());
                return Err(IdentityError::ExchangeFailed(detail));
            }
        };

        let response = self
            .client
            .get(&self.user_url)
            .bearer_auth(&access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| IdentityError::ProfileFetchFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IdentityError::ProfileFetchFailed(format!(
                "GitHub user endpoint returned {}",
                response.status()
            )));
        }
        let user: GitHubUser = response
            .json()
            .await
            .map_err(|e| IdentityError::ProfileFetchFailed(e.to_string()))?;

        Ok(Principal {
            external_id: user.id.to_string(),
            username: user.login,
            display_name: user.name,
            avatar_url: user.avatar_url,
        })
    }
}
