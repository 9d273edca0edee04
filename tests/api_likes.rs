// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

#[actix_web::test]
async fn like_then_unlike_round_trips_the_count() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let owner = harness.seed_user("gh-owner", "owner").await;
    let fan = harness.seed_user("gh-fan", "fan").await;
    let game = harness.seed_game(&owner, "Likeable").await;
    let cookie = harness.auth_cookie(&fan);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/like", game.id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json.get("success").and_then(Value::as_bool), Some(true));
    assert_eq!(json.get("likes_count").and_then(Value::as_u64), Some(1));

    // The liker sees is_liked on the detail view.
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail.get("is_liked").and_then(Value::as_bool), Some(true));
    assert_eq!(detail.get("likes_count").and_then(Value::as_u64), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{}/like", game.id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json.get("likes_count").and_then(Value::as_u64), Some(0));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", game.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail.get("is_liked").and_then(Value::as_bool), Some(false));
}

#[actix_web::test]
async fn double_like_is_rejected() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let owner = harness.seed_user("gh-owner", "owner").await;
    let fan = harness.seed_user("gh-fan", "fan").await;
    let game = harness.seed_game(&owner, "Likeable").await;
    let cookie = harness.auth_cookie(&fan);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/like", game.id))
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/like", game.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json.get("error").and_then(Value::as_str),
        Some("Already liked")
    );

    // The duplicate attempt did not inflate the count.
    assert_eq!(
        harness
            .app_state
            .stores
            .likes
            .count_by_game(game.id)
            .await
            .expect("count"),
        1
    );
}

#[actix_web::test]
async fn unliking_without_a_like_is_a_noop() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let owner = harness.seed_user("gh-owner", "owner").await;
    let fan = harness.seed_user("gh-fan", "fan").await;
    let game = harness.seed_game(&owner, "Unloved").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{}/like", game.id))
        .cookie(harness.auth_cookie(&fan))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json.get("success").and_then(Value::as_bool), Some(true));
    assert_eq!(json.get("likes_count").and_then(Value::as_u64), Some(0));
}

#[actix_web::test]
async fn liking_requires_session_and_existing_game() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let fan = harness.seed_user("gh-fan", "fan").await;
    let ghost = "00000000-0000-4000-8000-000000000000";

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/like", ghost))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/like", ghost))
        .cookie(harness.auth_cookie(&fan))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(
        json.get("error").and_then(Value::as_str),
        Some("Game not found")
    );
}
