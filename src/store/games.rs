// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use super::error::StoreError;
use super::types::{map_game, map_tag, map_user_summary, CreateGameInput, GameDetail,
    GameListQuery, GameRecord, TagRecord, UpdateGameInput, UserSummary};
use super::GameStore;
use crate::entity::{game_tags, games, likes, tags, users};

#[derive(Clone)]
pub struct SeaOrmGameStore {
    db: DatabaseConnection,
}

impl SeaOrmGameStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach owner summary, tags and live like counts to a page of
    /// game rows. Three batch queries, assembled in memory.
    async fn enrich(&self, rows: Vec<games::Model>) -> Result<Vec<GameDetail>, StoreError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let game_ids: Vec<Uuid> = rows.iter().map(|game| game.id).collect();
        let mut user_ids: Vec<Uuid> = rows.iter().map(|game| game.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let owners: HashMap<Uuid, UserSummary> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .iter()
            .map(|user| (user.id, map_user_summary(user)))
            .collect();

        let links = game_tags::Entity::find()
            .filter(game_tags::Column::GameId.is_in(game_ids.clone()))
            .all(&self.db)
            .await?;
        let mut tag_ids: Vec<Uuid> = links.iter().map(|link| link.tag_id).collect();
        tag_ids.sort_unstable();
        tag_ids.dedup();
        let tag_rows: HashMap<Uuid, TagRecord> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            tags::Entity::find()
                .filter(tags::Column::Id.is_in(tag_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|tag| (tag.id, map_tag(tag)))
                .collect()
        };
        let mut tags_by_game: HashMap<Uuid, Vec<TagRecord>> = HashMap::new();
        for link in links {
            if let Some(tag) = tag_rows.get(&link.tag_id) {
                tags_by_game
                    .entry(link.game_id)
                    .or_default()
                    .push(tag.clone());
            }
        }

        let mut likes_by_game: HashMap<Uuid, u64> = HashMap::new();
        for like in likes::Entity::find()
            .filter(likes::Column::GameId.is_in(game_ids))
            .all(&self.db)
            .await?
        {
            *likes_by_game.entry(like.game_id).or_insert(0) += 1;
        }

        let mut details = Vec::with_capacity(rows.len());
        for game in rows {
            let user = match owners.get(&game.user_id) {
                Some(summary) => summary.clone(),
                None => {
                    // Owner rows are never deleted; missing here means
                    // backend inconsistency.
                    return Err(StoreError::Backend(format!(
                        "Game {} references missing user {}",
                        game.id, game.user_id
                    )));
                }
            };
            details.push(GameDetail {
                user,
                tags: tags_by_game.remove(&game.id).unwrap_or_default(),
                likes_count: likes_by_game.get(&game.id).copied().unwrap_or(0),
                id: game.id,
                user_id: game.user_id,
                title: game.title,
                description: game.description,
                screenshot_url: game.screenshot_url,
                vercel_url: game.vercel_url,
                github_url: game.github_url,
                qiita_url: game.qiita_url,
                created_at: game.created_at,
                updated_at: game.updated_at,
            });
        }
        Ok(details)
    }
}

#[async_trait]
impl GameStore for SeaOrmGameStore {
    async fn list(&self, query: &GameListQuery) -> Result<Vec<GameDetail>, StoreError> {
        let mut select = games::Entity::find()
            .order_by_desc(games::Column::CreatedAt)
            .offset(query.offset)
            .limit(query.limit);

        if let Some(search) = query.search.as_deref() {
            // SQLite LIKE is case-insensitive for ASCII, matching the
            // original's ilike semantics.
            select = select.filter(
                Condition::any()
                    .add(games::Column::Title.contains(search))
                    .add(games::Column::Description.contains(search)),
            );
        }

        let rows = select.all(&self.db).await?;
        let mut details = self.enrich(rows).await?;

        // Tag filtering happens on the already-paginated page; a page
        // can come back shorter than `limit` even when later pages
        // still hold matches.
        if let Some(filter) = query.tags.as_ref() {
            if !filter.is_empty() {
                details.retain(|game| {
                    game.tags
                        .iter()
                        .any(|tag| filter.iter().any(|wanted| wanted == &tag.name))
                });
            }
        }

        Ok(details)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GameDetail>, StoreError> {
        let Some(row) = games::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut details = self.enrich(vec![row]).await?;
        Ok(details.pop())
    }

    async fn owner_id(&self, id: Uuid) -> Result<Option<Uuid>, StoreError> {
        let found = games::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(|game| game.user_id))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let count = games::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn create(&self, input: CreateGameInput) -> Result<GameRecord, StoreError> {
        let now = Utc::now();
        let model = games::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            screenshot_url: Set(input.screenshot_url),
            vercel_url: Set(input.vercel_url),
            github_url: Set(input.github_url),
            qiita_url: Set(input.qiita_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(map_game(model))
    }

    async fn update(&self, id: Uuid, input: UpdateGameInput) -> Result<GameRecord, StoreError> {
        let model = games::ActiveModel {
            id: Set(id),
            user_id: NotSet,
            title: input.title.map_or(NotSet, Set),
            description: input.description.map_or(NotSet, Set),
            screenshot_url: input.screenshot_url.map_or(NotSet, Set),
            vercel_url: input.vercel_url.map_or(NotSet, Set),
            github_url: input.github_url.map_or(NotSet, |url| Set(Some(url))),
            qiita_url: input.qiita_url.map_or(NotSet, |url| Set(Some(url))),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        }
        .update(&self.db)
        .await
        .map_err(|err| match err {
            sea_orm::DbErr::RecordNotUpdated => StoreError::NotFound,
            other => other.into(),
        })?;
        Ok(map_game(model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = games::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        Ok(games::Entity::find()
            .filter(games::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?)
    }

    async fn list_ids_by_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let rows = games::Entity::find()
            .filter(games::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|game| game.id).collect())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameDetail>, StoreError> {
        let rows = games::Entity::find()
            .filter(games::Column::UserId.eq(user_id))
            .order_by_desc(games::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        self.enrich(rows).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(games::Entity::find().count(&self.db).await?)
    }
}
