// tests/integration/analytics_demos_tests.rs

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use crm_backend::api::dto::analytics_dto::AnalyticsQuery;
use crm_backend::domain::demo_status::DemoStatus;
use crm_backend::domain::role::Role;
use crm_backend::middleware::auth::CurrentIdentity;
use serde_json::json;
use uuid::Uuid;

use crate::common::test_data::{create_user, AccountFixture, DemoFixture};
use crate::common::{app_helper, auth_helper, request};

#[tokio::test]
async fn test_lifetime_counts_cover_all_buckets() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let user = create_user(conn, Some("Owner"), Role::Basic).await;
    let at = Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap();

    let little = AccountFixture::new(user.id).users(5).insert(conn).await;
    let small = AccountFixture::new(user.id).users(15).insert(conn).await;
    let medium = AccountFixture::new(user.id).users(30).insert(conn).await;
    let enterprise = AccountFixture::new(user.id).users(100).insert(conn).await;
    let r#unsized = AccountFixture::new(user.id).insert(conn).await;
    let deleted = AccountFixture::new(user.id).users(100).deleted().insert(conn).await;

    DemoFixture::completed(little.id, user.id, at).insert(conn).await;
    DemoFixture::scheduled(little.id, user.id, at).insert(conn).await;
    DemoFixture::completed(small.id, user.id, at).insert(conn).await;
    DemoFixture::scheduled(medium.id, user.id, at).insert(conn).await;
    DemoFixture::completed(enterprise.id, user.id, at).insert(conn).await;
    // none バケットは返さない
    DemoFixture::completed(r#unsized.id, user.id, at).insert(conn).await;
    // 対象外: キャンセル・無断欠席・削除済みデモ・削除済みアカウント
    DemoFixture::with_status(enterprise.id, user.id, DemoStatus::Cancelled, at)
        .insert(conn)
        .await;
    DemoFixture::with_status(enterprise.id, user.id, DemoStatus::NoShow, at)
        .insert(conn)
        .await;
    DemoFixture::completed(enterprise.id, user.id, at)
        .deleted()
        .insert(conn)
        .await;
    DemoFixture::completed(deleted.id, user.id, at).insert(conn).await;

    let (status, body) = request::send(
        &app,
        request::get(
            "/api/analytics/demos-by-size",
            Some(&auth_helper::admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"little": 2, "small": 1, "medium": 1, "enterprise": 1})
    );
}

#[tokio::test]
async fn test_date_filter_depends_on_status() {
    let (analytics, _leaderboard, db) = app_helper::setup_services().await;
    let conn = &db.connection;
    let user = create_user(conn, Some("Owner"), Role::Admin).await;
    let account = AccountFixture::new(user.id).users(12).insert(conn).await;

    let inside = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let outside = Utc.with_ymd_and_hms(2025, 5, 15, 12, 0, 0).unwrap();

    // 予定日時が範囲内の予定デモ
    DemoFixture::scheduled(account.id, user.id, inside).insert(conn).await;
    // 完了日時が範囲内の完了デモ
    DemoFixture::completed(account.id, user.id, inside)
        .insert(conn)
        .await;
    // 完了日時が範囲外（予定日時は範囲外）
    DemoFixture::completed(account.id, user.id, outside).insert(conn).await;
    // 予定日時が範囲外
    DemoFixture::scheduled(account.id, user.id, outside).insert(conn).await;
    // 範囲内でも完了日時のない完了デモは含めない
    DemoFixture::with_status(account.id, user.id, DemoStatus::Completed, inside)
        .insert(conn)
        .await;

    let identity = CurrentIdentity {
        user_id: user.id,
        role: Role::Admin,
    };
    let query = AnalyticsQuery {
        from: Some("2025-06-01".to_string()),
        to: Some("2025-06-30".to_string()),
        ..Default::default()
    };

    let counts = analytics.demos_by_size(&identity, &query).await.unwrap();

    assert_eq!(counts.small, 2);
    assert_eq!(counts.little + counts.medium + counts.enterprise, 0);
}

#[tokio::test]
async fn test_scope_matches_either_participant() {
    let (app, db) = app_helper::setup_app().await;
    let conn = &db.connection;
    let caller = create_user(conn, Some("Caller"), Role::Basic).await;
    let other = create_user(conn, Some("Other"), Role::Basic).await;
    let account = AccountFixture::new(other.id).users(60).insert(conn).await;
    let at = Utc::now() - Duration::days(2);

    // 呼び出し元が設定者
    DemoFixture::scheduled(account.id, caller.id, at).insert(conn).await;
    // 呼び出し元が実施者
    DemoFixture::completed(account.id, other.id, at)
        .done_by(caller.id)
        .insert(conn)
        .await;
    // 呼び出し元が関与していない
    DemoFixture::completed(account.id, other.id, at)
        .done_by(other.id)
        .insert(conn)
        .await;

    let token = auth_helper::access_token(caller.id, Role::Basic);
    let (status, body) = request::send(
        &app,
        request::get("/api/analytics/demos-by-size", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enterprise"], 2);

    // 管理者が userIds で絞り込む
    let uri = format!("/api/analytics/demos-by-size?userIds={}", other.id);
    let (_, body) = request::send(
        &app,
        request::get(&uri, Some(&auth_helper::admin_token())),
    )
    .await;
    assert_eq!(body["data"]["enterprise"], 2);
}

#[tokio::test]
async fn test_empty_result_reports_zero_buckets() {
    let (app, _db) = app_helper::setup_app().await;
    let token = auth_helper::access_token(Uuid::new_v4(), Role::Basic);

    let (status, body) = request::send(
        &app,
        request::get("/api/analytics/demos-by-size?from=2025-01-01", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"little": 0, "small": 0, "medium": 0, "enterprise": 0})
    );
}

#[tokio::test]
async fn test_demos_range_longer_than_366_days_is_rejected() {
    let (app, _db) = app_helper::setup_app().await;

    let (status, body) = request::send(
        &app,
        request::get(
            "/api/analytics/demos-by-size?from=2023-01-01&to=2025-01-01",
            Some(&auth_helper::admin_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_demos_by_size_requires_authentication() {
    let (app, _db) = app_helper::setup_app().await;

    let (status, body) =
        request::send(&app, request::get("/api/analytics/demos-by-size", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}
