use std::sync::Arc;

use fansite::config::AppConfig;
use fansite::services::accounts;
use fansite::state::AppState;
use fansite::store::{ContentStore, MemoryStore, PgStore};
use fansite::{db, routes};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");

    let store: Arc<dyn ContentStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::init_pool(database_url, config.db_max_connections)
                .await
                .expect("database init failed");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving in-memory fixtures");
            Arc::new(MemoryStore::with_fixtures())
        }
    };

    if let Some(admin) = &config.admin {
        match accounts::ensure_admin(store.as_ref(), admin).await {
            Ok(user) => tracing::info!(user_id = user.id, username = %user.username, "admin account ready"),
            Err(e) => tracing::error!(error = %e, "admin account setup failed"),
        }
    }

    let app = routes::app(AppState::new(store));
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "fansite listening");
    axum::serve(listener, app).await.expect("server failed");
}
