use clap::Parser;
use lyceum::{
    api, auth::token::TokenService, db::InMemoryUserStore, db::UserStore, utils::config::Config,
    AppState,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lyceum - stateless JWT authentication server
///
/// Serves registration, login, token refresh and the authenticated user
/// endpoints for the learning platform. Configuration comes from the
/// environment (and `.env`); flags override the bind address.
#[derive(Parser, Debug)]
#[command(
    name = "lyceum-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Lyceum - stateless JWT authentication server"
)]
struct Cli {
    /// Host address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "lyceum=debug,tower_http=debug"
    } else {
        "lyceum=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let tokens = Arc::new(TokenService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_access_expiry_ms,
        config.auth.jwt_refresh_expiry_ms,
    )?);
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        tokens: tokens.clone(),
        users,
    };

    let app = axum::Router::new()
        .nest("/api", api::routes::create_router(tokens))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Lyceum listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
