// src/main.rs
use crm_backend::api::{create_app, AppState};
use crm_backend::config::AppConfig;
use crm_backend::db::create_db_pool;
use crm_backend::utils::jwt::JwtManager;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env があれば読み込む
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting CRM backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        server_addr = %app_config.server_addr(),
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.database.auto_migrate {
        Migrator::up(&db_pool, None).await?;
        tracing::info!("Database migrations applied.");
    }

    let jwt_manager = Arc::new(JwtManager::new(&app_config.jwt)?);
    let server_addr = app_config.server_addr();

    let app_state = AppState::new(db_pool, jwt_manager, app_config);
    let app_router = create_app(app_state);

    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
