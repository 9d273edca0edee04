// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

#[actix_web::test]
async fn tag_creation_reports_whether_the_name_existed() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let user = harness.seed_user("gh-1", "octocat").await;
    let cookie = harness.auth_cookie(&user);

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .cookie(cookie.clone())
        .set_json(json!({ "name": "  Roguelike  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(
        created.get("name").and_then(Value::as_str),
        Some("Roguelike")
    );
    assert_eq!(created.get("exists").and_then(Value::as_bool), Some(false));

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .cookie(cookie)
        .set_json(json!({ "name": "Roguelike" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let existing: Value = test::read_body_json(resp).await;
    assert_eq!(existing.get("exists").and_then(Value::as_bool), Some(true));
    assert_eq!(
        existing.get("id").and_then(Value::as_str),
        created.get("id").and_then(Value::as_str)
    );
}

#[actix_web::test]
async fn tag_creation_validates_name_length() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    let user = harness.seed_user("gh-1", "octocat").await;
    let cookie = harness.auth_cookie(&user);

    for bad in [json!({ "name": "  " }), json!({ "name": "x".repeat(51) })] {
        let req = test::TestRequest::post()
            .uri("/api/tags")
            .cookie(cookie.clone())
            .set_json(bad)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(
            json.get("error").and_then(Value::as_str),
            Some("Tag name must be 1-50 characters")
        );
    }
}

#[actix_web::test]
async fn tag_creation_requires_a_session() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;

    let req = test::TestRequest::post()
        .uri("/api/tags")
        .set_json(json!({ "name": "Arcade" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn tag_list_filters_by_substring() {
    let harness = common::TestHarness::new().await;
    let app = test::init_service(common::build_test_app(&harness)).await;
    for name in ["Roguelike", "Rogue", "Puzzle"] {
        harness
            .app_state
            .stores
            .tags
            .create(name)
            .await
            .expect("tag");
    }

    let req = test::TestRequest::get()
        .uri("/api/tags?q=rogue")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|tag| tag.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Roguelike"));
    assert!(names.contains(&"Rogue"));

    let req = test::TestRequest::get().uri("/api/tags?limit=1").to_request();
    let resp = test::call_service(&app, req).await;
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json.as_array().expect("array").len(), 1);
}
