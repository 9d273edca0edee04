// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod github;
pub mod jwt;
pub mod middleware;
mod service;
pub(crate) mod types;

pub use github::{GitHubIdentityProvider, IdentityProvider};
pub use jwt::{Claims, JwtError, JwtService};
pub use middleware::{AuthRequest, SessionMiddlewareFactory};
pub use service::resolve_or_create_user;
pub use types::{IdentityError, Principal};
