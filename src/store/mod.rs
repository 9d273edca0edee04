// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod error;
mod games;
mod likes;
mod tags;
mod types;
mod users;

use async_trait::async_trait;
use uuid::Uuid;

pub use error::StoreError;
pub use games::SeaOrmGameStore;
pub use likes::SeaOrmLikeStore;
pub use tags::SeaOrmTagStore;
pub use types::{
    CreateGameInput, CreateUserInput, GameDetail, GameListQuery, GameRecord, TagRecord,
    UpdateGameInput, UserProfile, UserRecord, UserSummary,
};
pub use users::SeaOrmUserStore;

/// Local user records, keyed by the external (GitHub) identity.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_github_id(&self, github_id: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError>;
    async fn create(&self, input: CreateUserInput) -> Result<UserRecord, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Newest-first page of enriched games. `search` matches title or
    /// description as a case-insensitive substring; the tag filter is
    /// applied after the page is fetched.
    async fn list(&self, query: &GameListQuery) -> Result<Vec<GameDetail>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GameDetail>, StoreError>;
    async fn owner_id(&self, id: Uuid) -> Result<Option<Uuid>, StoreError>;
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn create(&self, input: CreateGameInput) -> Result<GameRecord, StoreError>;
    async fn update(&self, id: Uuid, input: UpdateGameInput) -> Result<GameRecord, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, StoreError>;
    async fn list_ids_by_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
    async fn list_by_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameDetail>, StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    /// Tags ordered by usage count, descending. `query` filters by
    /// case-insensitive substring on the name.
    async fn list(&self, query: Option<&str>, limit: u64) -> Result<Vec<TagRecord>, StoreError>;
    /// Exact-match lookup; no case folding, no trimming.
    async fn find_by_name(&self, name: &str) -> Result<Option<TagRecord>, StoreError>;
    /// Plain insert. Callers check `find_by_name` first; a concurrent
    /// duplicate surfaces as `StoreError::Conflict`.
    async fn create(&self, name: &str) -> Result<TagRecord, StoreError>;
    async fn link_to_game(&self, game_id: Uuid, tag_ids: &[Uuid]) -> Result<(), StoreError>;
    async fn unlink_from_game(&self, game_id: Uuid) -> Result<(), StoreError>;
    async fn count(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Fails with `StoreError::Conflict` if the pair already exists.
    async fn create(&self, user_id: Uuid, game_id: Uuid) -> Result<(), StoreError>;
    /// Removing an absent like is a no-op.
    async fn delete(&self, user_id: Uuid, game_id: Uuid) -> Result<(), StoreError>;
    async fn exists(&self, user_id: Uuid, game_id: Uuid) -> Result<bool, StoreError>;
    async fn count_by_game(&self, game_id: Uuid) -> Result<u64, StoreError>;
    async fn count_by_games(&self, game_ids: &[Uuid]) -> Result<u64, StoreError>;
    async fn liked_game_ids(
        &self,
        user_id: Uuid,
        game_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, StoreError>;
}
