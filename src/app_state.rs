// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::ValidatedConfig;
use crate::iam::{GitHubIdentityProvider, IdentityProvider, JwtService};
use crate::storage::{FsScreenshotStorage, ScreenshotStorage};
use crate::store::{
    GameStore, LikeStore, SeaOrmGameStore, SeaOrmLikeStore, SeaOrmTagStore, SeaOrmUserStore,
    TagStore, UserStore,
};

#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub games: Arc<dyn GameStore>,
    pub tags: Arc<dyn TagStore>,
    pub likes: Arc<dyn LikeStore>,
}

impl Stores {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserStore::new(db.clone())),
            games: Arc::new(SeaOrmGameStore::new(db.clone())),
            tags: Arc::new(SeaOrmTagStore::new(db.clone())),
            likes: Arc::new(SeaOrmLikeStore::new(db)),
        }
    }
}

pub struct AppState {
    pub stores: Stores,
    pub jwt: JwtService,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn ScreenshotStorage>,
    pub upload_max_bytes: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ValidatedConfig) -> Self {
        Self {
            stores: Stores::new(db),
            jwt: JwtService::new(config),
            identity: Arc::new(GitHubIdentityProvider::new(&config.github)),
            storage: Arc::new(FsScreenshotStorage::new(
                config.upload.dir.clone(),
                config.upload.public_base_url.clone(),
            )),
            upload_max_bytes: config.upload_max_bytes(),
        }
    }

    /// Same wiring with the OAuth provider swapped out, for tests and
    /// local setups without GitHub credentials.
    pub fn with_identity_provider(
        db: DatabaseConnection,
        config: &ValidatedConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            identity,
            ..Self::new(db, config)
        }
    }
}
