// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use miniarcade::iam::Principal;
use serde_json::Value;

fn stub_principal() -> Principal {
    Principal {
        external_id: "424242".to_string(),
        username: Some("octocat".to_string()),
        display_name: Some("The Octocat".to_string()),
        avatar_url: Some("https://avatars.example/u/424242".to_string()),
    }
}

#[actix_web::test]
async fn callback_signs_in_and_creates_the_user() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    harness.identity.set_principal(stub_principal());

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc&next=/games/new")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/games/new")
    );

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "miniarcade_auth")
        .expect("auth cookie");
    assert!(!cookie.value().is_empty());

    let user = harness
        .app_state
        .stores
        .users
        .find_by_github_id("424242")
        .await
        .expect("lookup")
        .expect("created");
    assert_eq!(user.username, "octocat");

    // The issued cookie works against an authenticated endpoint.
    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .cookie(cookie.into_owned())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json.get("github_id").and_then(Value::as_str),
        Some("424242")
    );
}

#[actix_web::test]
async fn callback_falls_back_through_the_username_chain() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    harness.identity.set_principal(Principal {
        external_id: "555".to_string(),
        username: None,
        display_name: None,
        avatar_url: None,
    });

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let user = harness
        .app_state
        .stores
        .users
        .find_by_github_id("555")
        .await
        .expect("lookup")
        .expect("created");
    assert_eq!(user.username, "Anonymous");
}

#[actix_web::test]
async fn callback_rejects_external_redirect_targets() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    harness.identity.set_principal(stub_principal());

    for uri in [
        "/auth/callback?code=abc&next=https://evil.example",
        "/auth/callback?code=abc&next=//evil.example",
        "/auth/callback?code=abc",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get("location")
                .and_then(|v| v.to_str().ok()),
            Some("/"),
            "uri {} should redirect to /",
            uri
        );
    }
}

#[actix_web::test]
async fn failed_exchange_redirects_to_the_error_page() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    harness.identity.set_failure();

    let req = test::TestRequest::get()
        .uri("/auth/callback?code=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/auth/auth-code-error")
    );
    assert!(resp
        .response()
        .cookies()
        .all(|cookie| cookie.name() != "miniarcade_auth"));
}

#[actix_web::test]
async fn missing_code_redirects_to_the_error_page() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::get().uri("/auth/callback").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/auth/auth-code-error")
    );
}

#[actix_web::test]
async fn logout_expires_the_session_cookie() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "miniarcade_auth")
        .expect("logout cookie");
    assert_eq!(cookie.value(), "");
}
