mod config;
mod db;
mod routes;
mod state;

use std::sync::Arc;

use divine_client::app::SiteContext;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = config::Config::from_env().expect("invalid configuration");

    // Lazy pool: the server comes up even when MySQL is down and each page
    // reports the connection error instead.
    let database = db::MySqlDatabase::connect_lazy(&config.db);
    tracing::info!(host = %config.db.host, database = %config.db.name, "mysql pool configured");

    let site = SiteContext { cart_count: 0, update_check_secs: config.update_check_secs };
    let state = state::AppState::new(Arc::new(database), site);

    let app = routes::app(state, &config.static_dir, &config.pkg_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "divine-shop listening");
    axum::serve(listener, app).await.expect("server failed");
}
