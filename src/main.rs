use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymtrack::config::Config;
use gymtrack::handlers::{dashboard, exercises, logs};
use gymtrack::middleware::AuthGate;
use gymtrack::repositories::{
    ExerciseRepository, LogRepository, SessionRepository, UserRepository,
};
use gymtrack::{db, migrations, routes};

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymtrack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    let session_keys = config.session_keys()?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let log_repo = LogRepository::new(pool.clone());

    spawn_session_cleanup(session_repo.clone());

    // Create handler states
    let gate = AuthGate::new(user_repo, session_repo, session_keys);
    let dashboard_state = dashboard::DashboardState {
        log_repo: log_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let logs_state = logs::LogsState {
        log_repo,
        exercise_repo,
    };

    let app = routes::create_router(gate, dashboard_state, exercises_state, logs_state, pool);

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn spawn_session_cleanup(session_repo: SessionRepository) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            match session_repo.cleanup_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Removed expired sessions"),
                Err(e) => tracing::warn!("Session cleanup failed: {}", e),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
