// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{games, tags, users};

/// Full user row, as returned by `GET /api/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub github_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile subset of a user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Owner summary embedded in enriched game views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: Uuid,
    pub name: String,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Bare game row, returned by create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub screenshot_url: String,
    pub vercel_url: String,
    pub github_url: Option<String>,
    pub qiita_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game row enriched with its owner summary, tags and live like count.
/// `is_liked` depends on the caller and is added by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub screenshot_url: String,
    pub vercel_url: String,
    pub github_url: Option<String>,
    pub qiita_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub tags: Vec<TagRecord>,
    pub likes_count: u64,
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub github_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateGameInput {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub screenshot_url: String,
    pub vercel_url: String,
    pub github_url: Option<String>,
    pub qiita_url: Option<String>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGameInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub screenshot_url: Option<String>,
    pub vercel_url: Option<String>,
    pub github_url: Option<String>,
    pub qiita_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GameListQuery {
    pub search: Option<String>,
    /// Post-pagination filter: a game on the fetched page is kept when
    /// at least one of its tag names is in this set. A page can
    /// therefore come back shorter than `limit`.
    pub tags: Option<Vec<String>>,
    pub offset: u64,
    pub limit: u64,
}

pub(crate) fn map_user(model: users::Model) -> UserRecord {
    UserRecord {
        id: model.id,
        github_id: model.github_id,
        username: model.username,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(crate) fn map_user_profile(model: users::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        username: model.username,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
    }
}

pub(crate) fn map_user_summary(model: &users::Model) -> UserSummary {
    UserSummary {
        id: model.id,
        username: model.username.clone(),
        avatar_url: model.avatar_url.clone(),
    }
}

pub(crate) fn map_tag(model: tags::Model) -> TagRecord {
    TagRecord {
        id: model.id,
        name: model.name,
        usage_count: model.usage_count,
        created_at: model.created_at,
    }
}

pub(crate) fn map_game(model: games::Model) -> GameRecord {
    GameRecord {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        screenshot_url: model.screenshot_url,
        vercel_url: model.vercel_url,
        github_url: model.github_url,
        qiita_url: model.qiita_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
