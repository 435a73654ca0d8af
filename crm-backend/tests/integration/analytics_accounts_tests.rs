// tests/integration/analytics_accounts_tests.rs

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use crm_backend::domain::deal_stage::DealStage;
use crm_backend::domain::role::Role;
use serde_json::{json, Value};

use crate::common::test_data::{create_user, AccountFixture};
use crate::common::{app_helper, auth_helper, request};

async fn fetch(app: &axum::Router, uri: &str, token: &str) -> (StatusCode, Value) {
    request::send(app, request::get(uri, Some(token))).await
}

#[tokio::test]
async fn test_lifetime_totals_for_admin() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;

    let alice = create_user(conn, Some("Alice"), Role::Basic).await;
    let bob = create_user(conn, Some("Bob"), Role::Basic).await;
    let closed = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();

    AccountFixture::new(alice.id).insert(conn).await;
    AccountFixture::new(alice.id)
        .closed(DealStage::Won, closed)
        .insert(conn)
        .await;
    AccountFixture::new(bob.id)
        .closed(DealStage::Lost, closed)
        .insert(conn)
        .await;
    // closed_at のない WON は成約に数えない
    AccountFixture::new(bob.id)
        .stage(DealStage::Won)
        .insert(conn)
        .await;
    AccountFixture::new(bob.id).deleted().insert(conn).await;

    let (status, body) = fetch(&app, "/api/analytics/accounts", &auth_helper::admin_token()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"created": 4, "modified": 4, "booked": 1, "lost": 1})
    );
}

#[tokio::test]
async fn test_basic_user_is_scoped_to_self() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;

    let caller = create_user(conn, Some("Caller"), Role::Basic).await;
    let other = create_user(conn, Some("Other"), Role::Basic).await;
    AccountFixture::new(caller.id).insert(conn).await;
    AccountFixture::new(other.id).insert(conn).await;
    AccountFixture::new(other.id).insert(conn).await;

    let token = auth_helper::access_token(caller.id, Role::Basic);
    let uri = format!(
        "/api/analytics/accounts?userIds={}&userId={}",
        other.id, other.id
    );
    let (status, body) = fetch(&app, &uri, &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 1);
}

#[tokio::test]
async fn test_admin_scope_filters() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let token = auth_helper::admin_token();

    let users = [
        create_user(conn, Some("One"), Role::Basic).await,
        create_user(conn, Some("Two"), Role::Basic).await,
        create_user(conn, Some("Three"), Role::Basic).await,
    ];
    for (i, user) in users.iter().enumerate() {
        for _ in 0..=i {
            AccountFixture::new(user.id).insert(conn).await;
        }
    }

    // userIds（重複・不正値を含む）
    let uri = format!(
        "/api/analytics/accounts?userIds={},{},not-a-uuid,{}",
        users[0].id, users[2].id, users[0].id
    );
    let (_, body) = fetch(&app, &uri, &token).await;
    assert_eq!(body["data"]["created"], 1 + 3);

    // userId 単体
    let uri = format!("/api/analytics/accounts?userId={}", users[1].id);
    let (_, body) = fetch(&app, &uri, &token).await;
    assert_eq!(body["data"]["created"], 2);

    // 有効な ID がなければ制限なし
    let (status, body) = fetch(&app, "/api/analytics/accounts?userIds=bad,worse", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 6);

    // userIds が指定されていれば userId には落ちない
    let uri = format!("/api/analytics/accounts?userIds=bad&userId={}", users[1].id);
    let (status, body) = fetch(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 6);
}

#[tokio::test]
async fn test_each_counter_uses_its_own_date_field() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let token = auth_helper::admin_token();
    let user = create_user(conn, Some("Owner"), Role::Basic).await;

    // 1 月作成、3 月更新・成約
    AccountFixture::new(user.id)
        .created_at(Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap())
        .updated_at(Utc.with_ymd_and_hms(2025, 3, 5, 8, 0, 0).unwrap())
        .closed(DealStage::Won, Utc.with_ymd_and_hms(2025, 3, 6, 8, 0, 0).unwrap())
        .insert(conn)
        .await;
    // 3 月末日の最終時刻に作成（日付だけの to に含まれる）
    AccountFixture::new(user.id)
        .created_at(Utc.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap())
        .insert(conn)
        .await;
    // 4 月に作成・失注
    AccountFixture::new(user.id)
        .created_at(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap())
        .closed(DealStage::Lost, Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap())
        .insert(conn)
        .await;

    let (status, body) = fetch(
        &app,
        "/api/analytics/accounts?from=2025-03-01&to=2025-03-31",
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"created": 1, "modified": 2, "booked": 1, "lost": 0})
    );

    // from のみ
    let (_, body) = fetch(&app, "/api/analytics/accounts?from=2025-04-01", &token).await;
    assert_eq!(
        body["data"],
        json!({"created": 1, "modified": 1, "booked": 0, "lost": 1})
    );

    // 時刻付きの to はそのまま使う
    let (_, body) = fetch(
        &app,
        "/api/analytics/accounts?from=2025-03-01&to=2025-03-31T12:00:00Z",
        &token,
    )
    .await;
    assert_eq!(body["data"]["created"], 0);
}

#[tokio::test]
async fn test_unparsable_bounds_are_ignored() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let user = create_user(conn, Some("Owner"), Role::Basic).await;
    AccountFixture::new(user.id)
        .created_at(Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap())
        .insert(conn)
        .await;

    let (status, body) = fetch(
        &app,
        "/api/analytics/accounts?from=yesterday&to=2030-01-01",
        &auth_helper::admin_token(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["created"], 1);
}

#[tokio::test]
async fn test_out_of_range_years_are_ignored() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let user = create_user(conn, Some("Owner"), Role::Basic).await;
    AccountFixture::new(user.id).insert(conn).await;
    let token = auth_helper::admin_token();

    for uri in [
        "/api/analytics/accounts?from=-9999-01-01",
        "/api/analytics/accounts?to=%2B300000-01-01",
    ] {
        let (status, body) = fetch(&app, uri, &token).await;
        assert_eq!(status, StatusCode::OK, "uri: {}", uri);
        assert_eq!(body["data"]["created"], 1, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_range_longer_than_366_days_is_rejected() {
    let (app, _db) = app_helper::setup_app().await;
    let token = auth_helper::admin_token();

    let (status, body) = fetch(
        &app,
        "/api/analytics/accounts?from=2024-01-01&to=2025-01-03",
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DATE_RANGE");

    // ちょうど 366 日（閏年）は許可
    let (status, _) = fetch(
        &app,
        "/api/analytics/accounts?from=2024-01-01T00:00:00Z&to=2025-01-01T00:00:00Z",
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_oversized_query_is_a_validation_error() {
    let (app, _db) = app_helper::setup_app().await;

    let uri = format!("/api/analytics/accounts?userIds={}", "a".repeat(4097));
    let (status, body) = fetch(&app, &uri, &auth_helper::admin_token()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_repeated_query_key_is_a_validation_error() {
    let (app, _db) = app_helper::setup_app().await;

    let (status, body) = fetch(
        &app,
        "/api/analytics/accounts?from=2025-01-01&from=2025-02-01",
        &auth_helper::admin_token(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_account_summary_requires_authentication() {
    let (app, _db) = app_helper::setup_app().await;

    let (status, body) =
        request::send(&app, request::get("/api/analytics/accounts", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}
