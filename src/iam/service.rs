// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::Principal;
use crate::store::{CreateUserInput, StoreError, UserRecord, UserStore};

/// Find the local user for a provider identity, creating the record on
/// first sign-in. A create failure is logged and swallowed; the login
/// flow still completes and the record is retried on the next request
/// that needs it.
pub async fn resolve_or_create_user(
    users: &dyn UserStore,
    principal: &Principal,
) -> Option<UserRecord> {
    match users.find_by_github_id(&principal.external_id).await {
        Ok(Some(user)) => return Some(user),
        Ok(None) => {}
        Err(e) => {
            log::error!(
                "User lookup failed for github id {}: {}",
                principal.external_id,
                e
            );
            return None;
        }
    }

    let input = CreateUserInput {
        github_id: principal.external_id.clone(),
        username: principal.preferred_username(),
        avatar_url: principal.avatar_url.clone(),
    };
    match users.create(input).await {
        Ok(user) => {
            log::info!(
                "Created user {} for github id {}",
                user.username,
                user.github_id
            );
            Some(user)
        }
        Err(StoreError::Conflict(_)) => {
            // Lost a race with a concurrent first sign-in.
            match users.find_by_github_id(&principal.external_id).await {
                Ok(found) => found,
                Err(e) => {
                    log::error!(
                        "User lookup after create conflict failed for github id {}: {}",
                        principal.external_id,
                        e
                    );
                    None
                }
            }
        }
        Err(e) => {
            log::error!(
                "User creation failed for github id {}: {}",
                principal.external_id,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeaOrmUserStore;

    fn principal(external_id: &str, username: Option<&str>) -> Principal {
        Principal {
            external_id: external_id.to_string(),
            username: username.map(str::to_string),
            display_name: None,
            avatar_url: Some("https://avatars.example/u/1".to_string()),
        }
    }

    #[tokio::test]
    async fn first_sign_in_creates_the_user() {
        let db = crate::db::connect("sqlite::memory:").await.expect("db");
        let store = SeaOrmUserStore::new(db);

        let created = resolve_or_create_user(&store, &principal("777", Some("octocat")))
            .await
            .expect("created");
        assert_eq!(created.github_id, "777");
        assert_eq!(created.username, "octocat");

        let again = resolve_or_create_user(&store, &principal("777", Some("renamed")))
            .await
            .expect("found");
        assert_eq!(again.id, created.id);
        // Existing records keep their original handle.
        assert_eq!(again.username, "octocat");
    }

    #[tokio::test]
    async fn missing_provider_fields_fall_back_to_placeholder() {
        let db = crate::db::connect("sqlite::memory:").await.expect("db");
        let store = SeaOrmUserStore::new(db);

        let created = resolve_or_create_user(&store, &principal("888", None))
            .await
            .expect("created");
        assert_eq!(created.username, "Anonymous");
    }
}
