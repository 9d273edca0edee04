// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use super::error::StoreError;
use super::types::{map_tag, TagRecord};
use super::TagStore;
use crate::entity::{game_tags, tags};

#[derive(Clone)]
pub struct SeaOrmTagStore {
    db: DatabaseConnection,
}

impl SeaOrmTagStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagStore for SeaOrmTagStore {
    async fn list(&self, query: Option<&str>, limit: u64) -> Result<Vec<TagRecord>, StoreError> {
        let mut select = tags::Entity::find()
            .order_by_desc(tags::Column::UsageCount)
            .limit(limit);
        if let Some(filter) = query {
            select = select.filter(tags::Column::Name.contains(filter));
        }
        let rows = select.all(&self.db).await?;
        Ok(rows.into_iter().map(map_tag).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TagRecord>, StoreError> {
        let found = tags::Entity::find()
            .filter(tags::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found.map(map_tag))
    }

    async fn create(&self, name: &str) -> Result<TagRecord, StoreError> {
        let model = tags::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            usage_count: Set(0),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(map_tag(model))
    }

    async fn link_to_game(&self, game_id: Uuid, tag_ids: &[Uuid]) -> Result<(), StoreError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let links = tag_ids.iter().map(|tag_id| game_tags::ActiveModel {
            game_id: Set(game_id),
            tag_id: Set(*tag_id),
        });
        game_tags::Entity::insert_many(links).exec(&self.db).await?;
        Ok(())
    }

    async fn unlink_from_game(&self, game_id: Uuid) -> Result<(), StoreError> {
        game_tags::Entity::delete_many()
            .filter(game_tags::Column::GameId.eq(game_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(tags::Entity::find().count(&self.db).await?)
    }
}
