// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web::Data;
use actix_web::Error;
use actix_web::{HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc; // Services are per-thread

use super::jwt::Claims;
use super::types::Principal;
use crate::app_state::AppState;

/// Trait to add authentication methods to HttpRequest
pub trait AuthRequest {
    fn principal(&self) -> Option<Principal>;
    fn jwt_claims(&self) -> Option<Claims>;
    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn principal(&self) -> Option<Principal> {
        self.extensions().get::<Principal>().cloned()
    }

    fn jwt_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Principal>().is_some()
    }
}

/// Resolves the session cookie into a `Principal` in request
/// extensions. Requests without a valid cookie pass through
/// anonymously; handlers decide whether that is a 401.
pub struct SessionMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for SessionMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let state = req.app_data::<Data<AppState>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(state) = state {
                let jwt = &state.jwt;
                if let Some(cookie) = req.cookie(jwt.cookie_name()) {
                    match jwt.verify_token(cookie.value()) {
                        Ok(claims) => {
                            req.extensions_mut().insert(claims.principal());
                            req.extensions_mut().insert(claims);
                        }
                        Err(e) => {
                            // Expired or tampered cookie; the request
                            // continues unauthenticated.
                            log::debug!("Session cookie rejected: {}", e);
                        }
                    }
                }
            }

            service.call(req).await
        })
    }
}
