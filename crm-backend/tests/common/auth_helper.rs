// tests/common/auth_helper.rs
//! 認証サービスの代わりにアクセストークンを発行する。

use chrono::{Duration, Utc};
use crm_backend::config::AppConfig;
use crm_backend::domain::role::Role;
use crm_backend::utils::jwt::{AccessTokenClaims, JwtConfig};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

fn sign(claims: &AccessTokenClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims_for(user_id: Uuid, role: Role, expires_in: Duration) -> AccessTokenClaims {
    let now = Utc::now();
    AccessTokenClaims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
        nbf: now.timestamp(),
        iss: JwtConfig::DEFAULT_ISSUER.to_string(),
        aud: JwtConfig::DEFAULT_AUDIENCE.to_string(),
        typ: "access".to_string(),
        role,
    }
}

/// テスト設定の秘密鍵で署名した有効なアクセストークン
pub fn access_token(user_id: Uuid, role: Role) -> String {
    let secret = AppConfig::for_testing().jwt.secret_key;
    sign(&claims_for(user_id, role, Duration::minutes(15)), &secret)
}

pub fn admin_token() -> String {
    access_token(Uuid::new_v4(), Role::Admin)
}

pub fn expired_token(user_id: Uuid) -> String {
    let secret = AppConfig::for_testing().jwt.secret_key;
    sign(&claims_for(user_id, Role::Basic, Duration::minutes(-30)), &secret)
}

pub fn token_signed_with(user_id: Uuid, secret: &str) -> String {
    sign(&claims_for(user_id, Role::Admin, Duration::minutes(15)), secret)
}
