// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

/// Identity established by the OAuth provider. Carried in the session
/// cookie and stored in request extensions for the handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Stable identifier at the provider (the numeric GitHub id,
    /// stringified).
    pub external_id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Principal {
    /// Display handle used when creating a local user record. Falls
    /// back through the provider's fields: login handle, then full
    /// name, then a placeholder.
    pub fn preferred_username(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.display_name.clone())
            .unwrap_or_else(|| "Anonymous".to_string())
    }
}

#[derive(Debug)]
pub enum IdentityError {
    ExchangeFailed(String),
    ProfileFetchFailed(String),
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityError::ExchangeFailed(msg) => {
                write!(f, "OAuth code exchange failed: {}", msg)
            }
            IdentityError::ProfileFetchFailed(msg) => {
                write!(f, "Profile fetch failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for IdentityError {}
