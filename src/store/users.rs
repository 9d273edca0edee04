// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter};
use uuid::Uuid;

use super::error::StoreError;
use super::types::{map_user, map_user_profile, CreateUserInput, UserProfile, UserRecord};
use super::UserStore;
use crate::entity::users;

#[derive(Clone)]
pub struct SeaOrmUserStore {
    db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn find_by_github_id(&self, github_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let found = users::Entity::find()
            .filter(users::Column::GithubId.eq(github_id))
            .one(&self.db)
            .await?;
        Ok(found.map(map_user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let found = users::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(map_user_profile))
    }

    async fn create(&self, input: CreateUserInput) -> Result<UserRecord, StoreError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            github_id: Set(input.github_id),
            username: Set(input.username),
            avatar_url: Set(input.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(map_user(model))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(users::Entity::find().count(&self.db).await?)
    }
}
