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
use super::LikeStore;
use crate::entity::likes;

#[derive(Clone)]
pub struct SeaOrmLikeStore {
    db: DatabaseConnection,
}

impl SeaOrmLikeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeStore for SeaOrmLikeStore {
    async fn create(&self, user_id: Uuid, game_id: Uuid) -> Result<(), StoreError> {
        likes::ActiveModel {
            user_id: Set(user_id),
            game_id: Set(game_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    async fn delete(&self, user_id: Uuid, game_id: Uuid) -> Result<(), StoreError> {
        likes::Entity::delete_many()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::GameId.eq(game_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn exists(&self, user_id: Uuid, game_id: Uuid) -> Result<bool, StoreError> {
        let count = likes::Entity::find()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::GameId.eq(game_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn count_by_game(&self, game_id: Uuid) -> Result<u64, StoreError> {
        Ok(likes::Entity::find()
            .filter(likes::Column::GameId.eq(game_id))
            .count(&self.db)
            .await?)
    }

    async fn count_by_games(&self, game_ids: &[Uuid]) -> Result<u64, StoreError> {
        if game_ids.is_empty() {
            return Ok(0);
        }
        Ok(likes::Entity::find()
            .filter(likes::Column::GameId.is_in(game_ids.iter().copied()))
            .count(&self.db)
            .await?)
    }

    async fn liked_game_ids(
        &self,
        user_id: Uuid,
        game_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, StoreError> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = likes::Entity::find()
            .filter(likes::Column::UserId.eq(user_id))
            .filter(likes::Column::GameId.is_in(game_ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|like| like.game_id).collect())
    }
}
