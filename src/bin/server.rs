//! Flightdesk server: bootstraps the database, applies the schema and serves
//! the REST API under /api.

use axum::Router;
use flightdesk::{
    apply_schema, booking_routes, common_routes, customer_routes, ensure_database_exists,
    flight_routes, AppState, Config,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flightdesk=info")),
        )
        .init();

    let config = Config::from_env();
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    apply_schema(&pool).await?;

    let state = AppState::new(pool);
    let api = Router::new()
        .merge(customer_routes(state.clone()))
        .merge(flight_routes(state.clone()))
        .merge(booking_routes(state.clone()));
    let app = Router::new()
        .merge(common_routes(state))
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
